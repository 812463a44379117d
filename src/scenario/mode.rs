use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Named traffic mix exercised by the timed phase.
#[derive(
    Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioMode {
    /// Symbols listing only.
    Symbols,
    /// Status endpoint only.
    Status,
    /// Data queries cycling through the known symbols.
    Data,
    /// Even three-way split: symbols, status, data.
    Mixed,
    /// Alternates symbols and status.
    Api,
}

impl ScenarioMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ScenarioMode::Symbols => "symbols",
            ScenarioMode::Status => "status",
            ScenarioMode::Data => "data",
            ScenarioMode::Mixed => "mixed",
            ScenarioMode::Api => "api",
        }
    }
}

impl std::fmt::Display for ScenarioMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
