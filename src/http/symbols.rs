use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::error::DecodeError;
use crate::scenario::DEFAULT_SYMBOL;

use super::{HttpExecutor, SETUP_TIMEOUT};

/// Upper bound on the symbols a run rotates through.
pub const MAX_SYMBOLS: usize = 5;
const MAX_PER_EXCHANGE: usize = 3;

/// Body of `GET /api/symbols`. Exchanges keep the server's order.
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolsResponse {
    #[serde(deserialize_with = "ordered_exchanges")]
    pub exchanges: Vec<(String, Vec<SymbolEntry>)>,
}

/// A listed symbol, either bare or as an object carrying extra metadata.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SymbolEntry {
    Plain(String),
    Detailed { symbol: String },
}

impl SymbolEntry {
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            SymbolEntry::Plain(symbol) | SymbolEntry::Detailed { symbol } => symbol,
        }
    }
}

impl SymbolsResponse {
    /// # Errors
    ///
    /// Returns an error when the body is not a valid symbols listing.
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        serde_json::from_slice(body).map_err(|source| DecodeError::Json {
            context: "symbols response",
            source,
        })
    }

    /// Default symbol first, then up to three per exchange, capped at
    /// [`MAX_SYMBOLS`].
    #[must_use]
    pub fn select(&self) -> Vec<String> {
        let mut symbols = vec![DEFAULT_SYMBOL.to_owned()];
        'exchanges: for (_, entries) in &self.exchanges {
            for entry in entries.iter().take(MAX_PER_EXCHANGE) {
                let symbol = entry.symbol();
                if !symbols.iter().any(|known| known == symbol) {
                    symbols.push(symbol.to_owned());
                }
                if symbols.len() >= MAX_SYMBOLS {
                    break 'exchanges;
                }
            }
        }
        symbols
    }

    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.exchanges
            .iter()
            .fold(0_usize, |total, (_, entries)| total.saturating_add(entries.len()))
    }
}

/// Fetches the symbol listing and picks the symbols to rotate through.
/// Falls back to the default symbol on any failure.
pub async fn discover_symbols(executor: &HttpExecutor, symbols_url: &str) -> Vec<String> {
    let fetched = executor.fetch(symbols_url, SETUP_TIMEOUT).await;
    if !fetched.outcome.is_success() {
        warn!(
            "Symbol discovery failed ({}); using {}.",
            fetched
                .outcome
                .error
                .as_deref()
                .unwrap_or("unexpected status"),
            DEFAULT_SYMBOL
        );
        return vec![DEFAULT_SYMBOL.to_owned()];
    }
    let Some(body) = fetched.body else {
        warn!("Symbol discovery returned no body; using {}.", DEFAULT_SYMBOL);
        return vec![DEFAULT_SYMBOL.to_owned()];
    };
    match SymbolsResponse::decode(&body) {
        Ok(response) => {
            let symbols = response.select();
            debug!("Discovered symbols: {}", symbols.join(", "));
            symbols
        }
        Err(err) => {
            warn!("Symbol discovery failed ({}); using {}.", err, DEFAULT_SYMBOL);
            vec![DEFAULT_SYMBOL.to_owned()]
        }
    }
}

fn ordered_exchanges<'de, D>(deserializer: D) -> Result<Vec<(String, Vec<SymbolEntry>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ExchangesVisitor;

    impl<'de> Visitor<'de> for ExchangesVisitor {
        type Value = Vec<(String, Vec<SymbolEntry>)>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map of exchange name to symbol list")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut exchanges = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((exchange, entries)) = map.next_entry()? {
                exchanges.push((exchange, entries));
            }
            Ok(exchanges)
        }
    }

    deserializer.deserialize_map(ExchangesVisitor)
}
