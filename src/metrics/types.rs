use serde::{Deserialize, Serialize};

/// Latency distribution over successful requests, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    #[serde(rename = "latency_min")]
    pub min: f64,
    #[serde(rename = "latency_max")]
    pub max: f64,
    #[serde(rename = "latency_mean")]
    pub mean: f64,
    #[serde(rename = "latency_median")]
    pub median: f64,
    #[serde(rename = "latency_p50")]
    pub p50: f64,
    #[serde(rename = "latency_p90")]
    pub p90: f64,
    #[serde(rename = "latency_p95")]
    pub p95: f64,
    #[serde(rename = "latency_p99")]
    pub p99: f64,
    #[serde(rename = "latency_stdev")]
    pub stdev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    #[serde(rename = "total_requests")]
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
    pub total_time_s: f64,
    pub requests_per_sec: f64,
    pub total_bytes: u64,
    pub throughput_mbps: f64,
    #[serde(flatten)]
    pub latency: LatencyStats,
}

/// Summary of a run in which no request succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegradedSummary {
    #[serde(rename = "total_requests", default)]
    pub total: u64,
    #[serde(default)]
    pub successful: u64,
    #[serde(default)]
    pub failed: u64,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunStats {
    Measured(PerformanceSummary),
    Degraded(DegradedSummary),
}

/// Compact projection used for comparisons. `None` means "not measured".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparableMetrics {
    #[serde(default)]
    pub p99_latency_ms: Option<f64>,
    #[serde(default)]
    pub mean_latency_ms: Option<f64>,
    #[serde(default)]
    pub requests_per_sec: Option<f64>,
    #[serde(default)]
    pub success_rate: Option<f64>,
}

impl RunStats {
    #[must_use]
    pub const fn total(&self) -> u64 {
        match self {
            RunStats::Measured(summary) => summary.total,
            RunStats::Degraded(summary) => summary.total,
        }
    }

    #[must_use]
    pub const fn successful(&self) -> u64 {
        match self {
            RunStats::Measured(summary) => summary.successful,
            RunStats::Degraded(summary) => summary.successful,
        }
    }

    #[must_use]
    pub const fn failed(&self) -> u64 {
        match self {
            RunStats::Measured(summary) => summary.failed,
            RunStats::Degraded(summary) => summary.failed,
        }
    }

    #[must_use]
    pub const fn measured(&self) -> Option<&PerformanceSummary> {
        match self {
            RunStats::Measured(summary) => Some(summary),
            RunStats::Degraded(_) => None,
        }
    }

    /// Success percentage, or `None` for an empty run.
    #[must_use]
    pub fn success_rate(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some(self.successful() as f64 / total as f64 * 100.0)
    }

    #[must_use]
    pub fn comparable(&self) -> ComparableMetrics {
        match self {
            RunStats::Measured(summary) => ComparableMetrics {
                p99_latency_ms: Some(summary.latency.p99),
                mean_latency_ms: Some(summary.latency.mean),
                requests_per_sec: Some(summary.requests_per_sec),
                success_rate: self.success_rate(),
            },
            RunStats::Degraded(_) => ComparableMetrics {
                success_rate: self.success_rate(),
                ..ComparableMetrics::default()
            },
        }
    }
}
