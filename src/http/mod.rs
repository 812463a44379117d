//! Request execution against the target service.
mod client;
mod executor;
mod symbols;


pub use client::build_client;
pub use executor::{FetchedResponse, HttpExecutor, OutcomeKind, RequestExecutor, RequestOutcome};
pub use symbols::{MAX_SYMBOLS, SymbolEntry, SymbolsResponse, discover_symbols};

use std::time::Duration;

/// Per-request timeout for the timed phase unless `--timeout` says otherwise.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for discovery and warmup requests.
pub const SETUP_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for the connectivity check.
pub const CONNECTIVITY_TIMEOUT: Duration = Duration::from_secs(30);
