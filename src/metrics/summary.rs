use std::time::Duration;

use crate::http::RequestOutcome;

use super::{DegradedSummary, LatencyStats, PerformanceSummary, RunStats};

pub const NO_SUCCESS_ERROR: &str = "No successful requests";

const BITS_PER_BYTE: f64 = 8.0;
const BYTES_PER_MEBIBYTE: f64 = 1_048_576.0;

/// Reduces a run's outcomes to its summary.
///
/// Latency figures cover successful requests only; byte totals and rates
/// cover every outcome. A zero `elapsed` yields rates of zero.
#[must_use]
pub fn summarize(outcomes: &[RequestOutcome], elapsed: Duration) -> RunStats {
    let total = u64::try_from(outcomes.len()).unwrap_or(u64::MAX);
    let mut latencies: Vec<f64> = outcomes
        .iter()
        .filter(|outcome| outcome.is_success())
        .map(|outcome| outcome.latency_ms)
        .collect();
    let successful = u64::try_from(latencies.len()).unwrap_or(u64::MAX);
    let failed = total.saturating_sub(successful);

    if latencies.is_empty() {
        return RunStats::Degraded(DegradedSummary {
            total,
            successful: 0,
            failed,
            error: NO_SUCCESS_ERROR.to_owned(),
        });
    }

    latencies.sort_by(f64::total_cmp);
    let total_bytes = outcomes
        .iter()
        .fold(0_u64, |sum, outcome| sum.saturating_add(outcome.byte_count));
    let elapsed_s = elapsed.as_secs_f64();
    let (requests_per_sec, throughput_mbps) = if elapsed_s > 0.0 {
        (
            total as f64 / elapsed_s,
            total_bytes as f64 * BITS_PER_BYTE / BYTES_PER_MEBIBYTE / elapsed_s,
        )
    } else {
        (0.0, 0.0)
    };

    RunStats::Measured(PerformanceSummary {
        total,
        successful,
        failed,
        total_time_s: elapsed_s,
        requests_per_sec,
        total_bytes,
        throughput_mbps,
        latency: latency_stats(&latencies),
    })
}

/// Nearest-rank percentile over an ascending slice:
/// `sorted[min(floor(n * p / 100), n - 1)]`.
#[must_use]
pub fn percentile(sorted: &[f64], pct: usize) -> Option<f64> {
    let count = sorted.len();
    let rank = count.saturating_mul(pct) / 100;
    sorted.get(rank.min(count.checked_sub(1)?)).copied()
}

fn latency_stats(sorted: &[f64]) -> LatencyStats {
    let count = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / count;
    LatencyStats {
        min: sorted.first().copied().unwrap_or_default(),
        max: sorted.last().copied().unwrap_or_default(),
        mean,
        median: median(sorted),
        p50: percentile(sorted, 50).unwrap_or_default(),
        p90: percentile(sorted, 90).unwrap_or_default(),
        p95: percentile(sorted, 95).unwrap_or_default(),
        p99: percentile(sorted, 99).unwrap_or_default(),
        stdev: sample_stdev(sorted, mean),
    }
}

fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        return sorted.get(mid).copied().unwrap_or_default();
    }
    match (mid.checked_sub(1).and_then(|lower| sorted.get(lower)), sorted.get(mid)) {
        (Some(lower), Some(upper)) => (lower + upper) / 2.0,
        (None, _) | (_, None) => 0.0,
    }
}

/// Sample standard deviation (n - 1 denominator); zero below two samples.
fn sample_stdev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let squares: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
    (squares / (values.len() as f64 - 1.0)).sqrt()
}
