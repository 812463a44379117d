use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use tracing::debug;

/// Result of a single request. `status_code == 0` marks a transport failure.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOutcome {
    pub status_code: u16,
    pub latency_ms: f64,
    pub byte_count: u64,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    ProtocolError,
    TransportError,
}

impl RequestOutcome {
    #[must_use]
    pub const fn transport_failure(latency_ms: f64, error: String) -> Self {
        Self {
            status_code: 0,
            latency_ms,
            byte_count: 0,
            error: Some(error),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code == 200
    }

    #[must_use]
    pub const fn kind(&self) -> OutcomeKind {
        match self.status_code {
            200 => OutcomeKind::Success,
            0 => OutcomeKind::TransportError,
            _ => OutcomeKind::ProtocolError,
        }
    }
}

/// Outcome plus the retained body, used by the functional checks.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub outcome: RequestOutcome,
    pub body: Option<Bytes>,
}

/// Issues one GET and reports what happened. Never fails: every error is
/// folded into the returned outcome.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, url: &str, timeout: Duration) -> RequestOutcome;
}

#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Like [`RequestExecutor::execute`], but keeps the response body.
    pub async fn fetch(&self, url: &str, timeout: Duration) -> FetchedResponse {
        self.send(url, timeout, true).await
    }

    async fn send(&self, url: &str, timeout: Duration, keep_body: bool) -> FetchedResponse {
        let started = Instant::now();
        let response = match self.client.get(url).timeout(timeout).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!("Request to {} failed: {}", url, err);
                return FetchedResponse {
                    outcome: RequestOutcome::transport_failure(
                        elapsed_ms(started),
                        describe_transport_error(&err),
                    ),
                    body: None,
                };
            }
        };

        let status = response.status();
        let mut stream = response.bytes_stream();
        let mut byte_count: u64 = 0;
        let mut body = keep_body.then(BytesMut::new);
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(bytes) => {
                    byte_count =
                        byte_count.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
                    if let Some(buffer) = body.as_mut() {
                        buffer.extend_from_slice(&bytes);
                    }
                }
                Err(err) => {
                    debug!("Reading body from {} failed: {}", url, err);
                    return FetchedResponse {
                        outcome: RequestOutcome::transport_failure(
                            elapsed_ms(started),
                            describe_transport_error(&err),
                        ),
                        body: None,
                    };
                }
            }
        }

        FetchedResponse {
            outcome: RequestOutcome {
                status_code: status.as_u16(),
                latency_ms: elapsed_ms(started),
                byte_count,
                error: status_error(status),
            },
            body: body.map(BytesMut::freeze),
        }
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, url: &str, timeout: Duration) -> RequestOutcome {
        self.send(url, timeout, false).await.outcome
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

fn status_error(status: StatusCode) -> Option<String> {
    if status.is_success() {
        return None;
    }
    Some(format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    ))
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return "Request timed out".to_owned();
    }
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
