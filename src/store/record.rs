use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::driver::RunConfig;
use crate::error::StoreError;
use crate::functional::FunctionalTally;
use crate::metrics::{ComparableMetrics, RunStats};

const RECORD_PREFIX: &str = "benchmark_";
const ID_TIME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `benchmark_YYYYMMDD_HHMMSS`; lexicographic order is chronological.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    #[must_use]
    pub fn from_datetime(at: &NaiveDateTime) -> Self {
        Self(format!("{}{}", RECORD_PREFIX, at.format(ID_TIME_FORMAT)))
    }

    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(&Local::now().naive_local())
    }

    /// # Errors
    ///
    /// Returns an error unless `value` is a well-formed record id.
    pub fn parse(value: &str) -> Result<Self, StoreError> {
        let stamp = value
            .strip_prefix(RECORD_PREFIX)
            .ok_or_else(|| StoreError::InvalidRecordId {
                value: value.to_owned(),
            })?;
        NaiveDateTime::parse_from_str(stamp, ID_TIME_FORMAT).map_err(|_parse| {
            StoreError::InvalidRecordId {
                value: value.to_owned(),
            }
        })?;
        Ok(Self(value.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `YYYYMMDD_HHMMSS` part, used as a row label.
    #[must_use]
    pub fn stamp(&self) -> &str {
        self.0.strip_prefix(RECORD_PREFIX).unwrap_or(&self.0)
    }

    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl TryFrom<String> for RecordId {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One persisted run. Written once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRun {
    pub timestamp: String,
    pub server_url: String,
    pub test_configuration: RunConfig,
    pub functional_tests: FunctionalTally,
    pub performance_metrics: RunStats,
    pub performance_summary: ComparableMetrics,
}

impl StoredRun {
    #[must_use]
    pub fn new(
        server_url: &str,
        test_configuration: RunConfig,
        functional_tests: FunctionalTally,
        performance_metrics: RunStats,
        at: &DateTime<Local>,
    ) -> Self {
        let performance_summary = performance_metrics.comparable();
        Self {
            timestamp: at.to_rfc3339(),
            server_url: server_url.to_owned(),
            test_configuration,
            functional_tests,
            performance_metrics,
            performance_summary,
        }
    }
}
