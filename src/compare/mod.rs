//! Regression comparator: metric deltas against a baseline or the previous
//! run, historical trend bars, and the standalone history report.
mod history;
mod render;
mod report;
mod trend;


pub use history::{CompareOnlyReport, HistoryRow, compare_only};
pub use report::{
    Assessment, ComparisonKind, ComparisonReport, MetricDelta, MetricKind, Verdict, compare,
};
pub use trend::{HistoricalTrend, MetricTrend, TREND_BAR_WIDTH, TrendBar, TrendPoint};
