//! Run statistics: percentile summary over request outcomes.
mod summary;
mod types;


pub use summary::{NO_SUCCESS_ERROR, percentile, summarize};
pub use types::{ComparableMetrics, DegradedSummary, LatencyStats, PerformanceSummary, RunStats};
