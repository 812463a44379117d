use tracing::warn;

use crate::error::CompareError;
use crate::scenario::ScenarioMode;
use crate::store::{RecordId, ResultStore};

use super::{ComparisonKind, ComparisonReport, MetricKind, compare};

/// Records needed before a history comparison makes sense.
const MIN_RECORDS: usize = 2;
/// Rows shown in the history table.
const HISTORY_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub id: RecordId,
    pub mode: ScenarioMode,
    pub requests: usize,
    pub p99_latency_ms: Option<f64>,
    pub mean_latency_ms: Option<f64>,
    pub requests_per_sec: Option<f64>,
}

/// Recent runs plus the change between the last two readable ones.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareOnlyReport {
    pub rows: Vec<HistoryRow>,
    /// P99 and requests/sec only, at the previous-run threshold.
    pub last_change: Option<ComparisonReport>,
}

/// Builds the history report from stored runs without issuing requests.
///
/// # Errors
///
/// Returns [`CompareError::NotEnoughRecords`] with fewer than two stored
/// runs, or [`CompareError::Unreadable`] when the index cannot be read.
pub fn compare_only(store: &ResultStore) -> Result<CompareOnlyReport, CompareError> {
    let ids = store
        .list_records()
        .map_err(|source| CompareError::Unreadable {
            label: "result index".to_owned(),
            source,
        })?;
    if ids.len() < MIN_RECORDS {
        return Err(CompareError::NotEnoughRecords {
            required: MIN_RECORDS,
            found: ids.len(),
        });
    }

    let skip = ids.len().saturating_sub(HISTORY_ROWS);
    let mut loaded = Vec::with_capacity(HISTORY_ROWS);
    for id in ids.into_iter().skip(skip) {
        match store.load(&id) {
            Ok(run) => loaded.push((id, run)),
            Err(err) => warn!("Skipping {}: {}", id, err),
        }
    }

    let last_change = match loaded.as_slice() {
        [.., (_, previous), (_, current)] => {
            let mut report = compare(
                &current.performance_summary,
                &previous.performance_summary,
                ComparisonKind::Previous,
            );
            report.deltas.retain(|delta| {
                matches!(
                    delta.metric,
                    MetricKind::P99Latency | MetricKind::RequestsPerSec
                )
            });
            Some(report)
        }
        [] | [_] => None,
    };

    let rows = loaded
        .into_iter()
        .map(|(id, run)| HistoryRow {
            id,
            mode: run.test_configuration.mode,
            requests: run.test_configuration.total_requests.get(),
            p99_latency_ms: run.performance_summary.p99_latency_ms,
            mean_latency_ms: run.performance_summary.mean_latency_ms,
            requests_per_sec: run.performance_summary.requests_per_sec,
        })
        .collect();

    Ok(CompareOnlyReport { rows, last_change })
}
