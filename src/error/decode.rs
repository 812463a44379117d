use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid JSON in {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Response for {context} had no body.")]
    EmptyBody { context: &'static str },
    #[error("Data response is missing the newline that terminates its JSON header.")]
    MissingHeaderDelimiter,
    #[error("Data header is not valid UTF-8: {source}")]
    HeaderUtf8 {
        #[source]
        source: std::str::Utf8Error,
    },
}
