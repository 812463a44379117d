use serde::Deserialize;

use crate::error::DecodeError;

/// Body of `GET /api/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub exchanges: Vec<ExchangeStatus>,
    #[serde(default)]
    pub cached: Option<bool>,
    #[serde(default)]
    pub fetch_time_ms: Option<f64>,
}

/// Only presence of the update fields is checked, not their shape.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeStatus {
    pub exchange: String,
    pub last_update: serde_json::Value,
    pub last_update_date: serde_json::Value,
}

impl StatusResponse {
    /// # Errors
    ///
    /// Returns an error when the body is not a valid status payload.
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        serde_json::from_slice(body).map_err(|source| DecodeError::Json {
            context: "status response",
            source,
        })
    }
}

/// JSON header preceding the binary column data of `GET /api/data`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataHeader {
    pub columns: Vec<ColumnInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(default)]
    pub record_size: u64,
    #[serde(default)]
    pub num_records: u64,
    #[serde(default)]
    pub data_length: u64,
}

impl DataHeader {
    /// Largest record count across columns.
    #[must_use]
    pub fn record_count(&self) -> u64 {
        self.columns
            .iter()
            .map(|column| column.num_records)
            .max()
            .unwrap_or(0)
    }
}

/// Splits a data response at the first newline into its decoded header
/// and the raw column bytes that follow.
///
/// # Errors
///
/// Returns an error when the newline is missing or the header is not valid
/// UTF-8 JSON.
pub fn split_data_response(body: &[u8]) -> Result<(DataHeader, &[u8]), DecodeError> {
    let newline = body
        .iter()
        .position(|byte| *byte == b'\n')
        .ok_or(DecodeError::MissingHeaderDelimiter)?;
    let (header, rest) = body.split_at(newline);
    let header = std::str::from_utf8(header).map_err(|source| DecodeError::HeaderUtf8 { source })?;
    let decoded = serde_json::from_str(header).map_err(|source| DecodeError::Json {
        context: "data header",
        source,
    })?;
    Ok((decoded, rest.get(1..).unwrap_or_default()))
}
