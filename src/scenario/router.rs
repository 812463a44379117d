use chrono::Utc;
use reqwest::Url;

use crate::error::HttpError;

use super::ScenarioMode;

/// Symbol used when discovery fails or yields nothing.
pub const DEFAULT_SYMBOL: &str = "BTC-USD";

const SYMBOLS_PATH: &str = "/api/symbols";
const STATUS_PATH: &str = "/api/status";
const DATA_PATH: &str = "/api/data";
/// Data queries cover the hour ending at request time.
const DATA_WINDOW_SECS: i64 = 3600;
const MARKET_DATA_TYPE: &str = "MD";
const DATA_COLUMNS: &str = "time,best_bid,best_ask";
const MIXED_DATA_COLUMNS: &str = "time,best_bid";
/// Mixed mode rotates symbols, status, data.
const MIXED_CYCLE: usize = 3;
/// Api mode alternates symbols and status.
const API_CYCLE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'router> {
    Symbols,
    Status,
    Data {
        symbol: &'router str,
        columns: &'static str,
    },
}

/// Maps `(mode, request_index)` to the next URL to fetch.
///
/// Holds only read-only state, so one instance is shared by every in-flight
/// request of a run.
#[derive(Debug, Clone)]
pub struct Router {
    base: String,
    symbols_url: String,
    status_url: String,
    data_endpoint: Url,
    symbols: Vec<String>,
}

impl Router {
    /// Builds a router for `base_url`, falling back to [`DEFAULT_SYMBOL`]
    /// when `symbols` is empty.
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` is not an absolute URL.
    pub fn new(base_url: &str, symbols: Vec<String>) -> Result<Self, HttpError> {
        let base = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(base).map_err(|source| HttpError::InvalidUrl {
            url: base.to_owned(),
            source,
        })?;
        if parsed.cannot_be_a_base() {
            return Err(HttpError::CannotBeBase {
                url: base.to_owned(),
            });
        }
        let data_raw = format!("{}{}", base, DATA_PATH);
        let data_endpoint = Url::parse(&data_raw).map_err(|source| HttpError::InvalidUrl {
            url: data_raw.clone(),
            source,
        })?;

        let mut symbols: Vec<String> = symbols
            .into_iter()
            .map(|symbol| symbol.trim().to_owned())
            .filter(|symbol| !symbol.is_empty())
            .collect();
        if symbols.is_empty() {
            symbols.push(DEFAULT_SYMBOL.to_owned());
        }

        Ok(Self {
            base: base.to_owned(),
            symbols_url: format!("{}{}", base, SYMBOLS_PATH),
            status_url: format!("{}{}", base, STATUS_PATH),
            data_endpoint,
            symbols,
        })
    }

    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    #[must_use]
    pub fn symbols_url(&self) -> &str {
        &self.symbols_url
    }

    #[must_use]
    pub fn status_url(&self) -> &str {
        &self.status_url
    }

    /// `path` (with any query) appended to the base URL verbatim.
    #[must_use]
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Endpoint selected for `request_index` under `mode`.
    #[must_use]
    pub fn endpoint(&self, mode: ScenarioMode, request_index: usize) -> Endpoint<'_> {
        match mode {
            ScenarioMode::Symbols => Endpoint::Symbols,
            ScenarioMode::Status => Endpoint::Status,
            ScenarioMode::Data => Endpoint::Data {
                symbol: self.symbol_for(request_index),
                columns: DATA_COLUMNS,
            },
            ScenarioMode::Mixed => match request_index % MIXED_CYCLE {
                0 => Endpoint::Symbols,
                1 => Endpoint::Status,
                _ => Endpoint::Data {
                    symbol: self.symbol_for(request_index),
                    columns: MIXED_DATA_COLUMNS,
                },
            },
            ScenarioMode::Api => {
                if request_index % API_CYCLE == 0 {
                    Endpoint::Symbols
                } else {
                    Endpoint::Status
                }
            }
        }
    }

    /// URL for `request_index`, with data windows ending now.
    #[must_use]
    pub fn next_url(&self, mode: ScenarioMode, request_index: usize) -> String {
        self.url_at(mode, request_index, Utc::now().timestamp())
    }

    /// URL for `request_index`, with data windows ending at `end_secs`.
    #[must_use]
    pub fn url_at(&self, mode: ScenarioMode, request_index: usize, end_secs: i64) -> String {
        match self.endpoint(mode, request_index) {
            Endpoint::Symbols => self.symbols_url.clone(),
            Endpoint::Status => self.status_url.clone(),
            Endpoint::Data { symbol, columns } => self.data_url(
                symbol,
                end_secs.saturating_sub(DATA_WINDOW_SECS),
                end_secs,
                columns,
            ),
        }
    }

    /// Data query URL for an explicit window.
    #[must_use]
    pub fn data_url(&self, symbol: &str, start_secs: i64, end_secs: i64, columns: &str) -> String {
        let mut url = self.data_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("symbol", symbol)
            .append_pair("type", MARKET_DATA_TYPE)
            .append_pair("start", &start_secs.to_string())
            .append_pair("end", &end_secs.to_string())
            .append_pair("columns", columns);
        url.into()
    }

    fn symbol_for(&self, request_index: usize) -> &str {
        request_index
            .checked_rem(self.symbols.len())
            .and_then(|slot| self.symbols.get(slot))
            .map_or(DEFAULT_SYMBOL, String::as_str)
    }
}
