use crate::metrics::ComparableMetrics;

/// Relative change beyond which the baseline verdict flips.
const VERDICT_THRESHOLD_PCT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonKind {
    Baseline,
    Previous,
}

impl ComparisonKind {
    /// Significance threshold for per-metric assessments, in percent.
    #[must_use]
    pub const fn threshold_pct(self) -> f64 {
        match self {
            ComparisonKind::Baseline => 3.0,
            ComparisonKind::Previous => 5.0,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ComparisonKind::Baseline => "Baseline",
            ComparisonKind::Previous => "Previous",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    P99Latency,
    MeanLatency,
    RequestsPerSec,
    SuccessRate,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::P99Latency,
        MetricKind::MeanLatency,
        MetricKind::RequestsPerSec,
        MetricKind::SuccessRate,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            MetricKind::P99Latency => "P99 Latency",
            MetricKind::MeanLatency => "Mean Latency",
            MetricKind::RequestsPerSec => "Requests/sec",
            MetricKind::SuccessRate => "Success Rate",
        }
    }

    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            MetricKind::P99Latency | MetricKind::MeanLatency => "ms",
            MetricKind::RequestsPerSec => "",
            MetricKind::SuccessRate => "%",
        }
    }

    #[must_use]
    pub const fn lower_is_better(self) -> bool {
        matches!(self, MetricKind::P99Latency | MetricKind::MeanLatency)
    }

    /// The metric's value, when it was measured. Non-positive values are
    /// treated as unmeasured.
    #[must_use]
    pub fn value_of(self, metrics: &ComparableMetrics) -> Option<f64> {
        let value = match self {
            MetricKind::P99Latency => metrics.p99_latency_ms,
            MetricKind::MeanLatency => metrics.mean_latency_ms,
            MetricKind::RequestsPerSec => metrics.requests_per_sec,
            MetricKind::SuccessRate => metrics.success_rate,
        }?;
        (value > 0.0).then_some(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    Improved,
    Regressed,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricDelta {
    pub metric: MetricKind,
    pub previous: f64,
    pub current: f64,
    pub change_pct: f64,
    pub assessment: Assessment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Regression,
    Improvement,
    Similar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub kind: ComparisonKind,
    pub deltas: Vec<MetricDelta>,
    /// Present for baseline comparisons only.
    pub verdict: Option<Verdict>,
    pub previous_label: Option<String>,
    pub current_label: Option<String>,
}

impl ComparisonReport {
    #[must_use]
    pub fn with_labels(mut self, previous: impl Into<String>, current: impl Into<String>) -> Self {
        self.previous_label = Some(previous.into());
        self.current_label = Some(current.into());
        self
    }

    #[must_use]
    pub fn delta(&self, metric: MetricKind) -> Option<&MetricDelta> {
        self.deltas.iter().find(|delta| delta.metric == metric)
    }

    fn change_or_zero(&self, metric: MetricKind) -> f64 {
        self.delta(metric).map_or(0.0, |delta| delta.change_pct)
    }
}

/// Compares `current` against `previous`, skipping metrics either side did
/// not measure.
#[must_use]
pub fn compare(
    current: &ComparableMetrics,
    previous: &ComparableMetrics,
    kind: ComparisonKind,
) -> ComparisonReport {
    let threshold = kind.threshold_pct();
    let deltas = MetricKind::ALL
        .into_iter()
        .filter_map(|metric| {
            let before = metric.value_of(previous)?;
            let after = metric.value_of(current)?;
            let change_pct = (after - before) / before * 100.0;
            Some(MetricDelta {
                metric,
                previous: before,
                current: after,
                change_pct,
                assessment: assess(metric, change_pct, threshold),
            })
        })
        .collect();

    let mut report = ComparisonReport {
        kind,
        deltas,
        verdict: None,
        previous_label: None,
        current_label: None,
    };
    if kind == ComparisonKind::Baseline {
        report.verdict = Some(verdict(
            report.change_or_zero(MetricKind::P99Latency),
            report.change_or_zero(MetricKind::RequestsPerSec),
        ));
    }
    report
}

fn assess(metric: MetricKind, change_pct: f64, threshold: f64) -> Assessment {
    let improvement = if metric.lower_is_better() {
        -change_pct
    } else {
        change_pct
    };
    if improvement > 0.0 {
        Assessment::Improved
    } else if improvement < -threshold {
        Assessment::Regressed
    } else {
        Assessment::Unchanged
    }
}

fn verdict(p99_change: f64, rps_change: f64) -> Verdict {
    if p99_change > VERDICT_THRESHOLD_PCT || rps_change < -VERDICT_THRESHOLD_PCT {
        Verdict::Regression
    } else if p99_change < -VERDICT_THRESHOLD_PCT || rps_change > VERDICT_THRESHOLD_PCT {
        Verdict::Improvement
    } else {
        Verdict::Similar
    }
}
