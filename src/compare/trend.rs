use crate::metrics::ComparableMetrics;

use super::MetricKind;

/// Width of a full-length trend bar.
pub const TREND_BAR_WIDTH: usize = 30;
/// Prior runs shown alongside the current one.
const PRIOR_POINTS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub metrics: ComparableMetrics,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendBar {
    pub label: String,
    pub value: f64,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricTrend {
    pub metric: MetricKind,
    pub bars: Vec<TrendBar>,
}

/// Bar series over the last few runs, one per metric with data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoricalTrend {
    pub series: Vec<MetricTrend>,
}

impl HistoricalTrend {
    /// Uses the last four of `prior` (oldest first) plus `current`.
    #[must_use]
    pub fn from_points(prior: &[TrendPoint], current: TrendPoint) -> Self {
        let skip = prior.len().saturating_sub(PRIOR_POINTS);
        let window: Vec<&TrendPoint> = prior
            .iter()
            .skip(skip)
            .chain(std::iter::once(&current))
            .collect();

        let series = MetricKind::ALL
            .into_iter()
            .filter_map(|metric| {
                let values: Vec<(&str, f64)> = window
                    .iter()
                    .filter_map(|point| {
                        metric
                            .value_of(&point.metrics)
                            .map(|value| (point.label.as_str(), value))
                    })
                    .collect();
                let max = values.iter().map(|(_, value)| *value).fold(0.0, f64::max);
                if values.is_empty() || max <= 0.0 {
                    return None;
                }
                let bars = values
                    .into_iter()
                    .map(|(label, value)| TrendBar {
                        label: label.to_owned(),
                        value,
                        length: bar_length(value, max),
                    })
                    .collect();
                Some(MetricTrend { metric, bars })
            })
            .collect();
        Self { series }
    }

    #[must_use]
    pub fn series_for(&self, metric: MetricKind) -> Option<&MetricTrend> {
        self.series.iter().find(|trend| trend.metric == metric)
    }
}

fn bar_length(value: f64, max: f64) -> usize {
    let scaled = (value / max * TREND_BAR_WIDTH as f64).floor();
    (scaled as usize).clamp(1, TREND_BAR_WIDTH)
}
