use std::fmt;

use serde::Deserialize;

use crate::metrics::PerformanceSummary;

use super::ScenarioMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementMetric {
    RequestsPerSec,
    P99,
    P95,
    P90,
    Mean,
    Max,
    Stdev,
    SuccessRate,
}

impl RequirementMetric {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            RequirementMetric::RequestsPerSec => "Requests/sec",
            RequirementMetric::P99 => "P99 latency (ms)",
            RequirementMetric::P95 => "P95 latency (ms)",
            RequirementMetric::P90 => "P90 latency (ms)",
            RequirementMetric::Mean => "Mean latency (ms)",
            RequirementMetric::Max => "Max latency (ms)",
            RequirementMetric::Stdev => "StdDev (ms)",
            RequirementMetric::SuccessRate => "Success rate %",
        }
    }

    /// Throughput and success rate are floors; latencies are ceilings.
    #[must_use]
    pub const fn is_floor(self) -> bool {
        matches!(
            self,
            RequirementMetric::RequestsPerSec | RequirementMetric::SuccessRate
        )
    }

    fn measure(self, summary: &PerformanceSummary) -> f64 {
        let latency = &summary.latency;
        match self {
            RequirementMetric::RequestsPerSec => summary.requests_per_sec,
            RequirementMetric::P99 => latency.p99,
            RequirementMetric::P95 => latency.p95,
            RequirementMetric::P90 => latency.p90,
            RequirementMetric::Mean => latency.mean,
            RequirementMetric::Max => latency.max,
            RequirementMetric::Stdev => latency.stdev,
            RequirementMetric::SuccessRate => {
                if summary.total == 0 {
                    0.0
                } else {
                    summary.successful as f64 / summary.total as f64 * 100.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Requirement {
    pub metric: RequirementMetric,
    pub limit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequirementViolation {
    pub metric: RequirementMetric,
    pub actual: f64,
    pub limit: f64,
}

impl fmt::Display for RequirementViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.metric.is_floor() { '<' } else { '>' };
        write!(
            f,
            "{}: {:.2} {} {}",
            self.metric.label(),
            self.actual,
            op,
            self.limit
        )
    }
}

/// Per-mode limit overrides read from the config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequirementOverrides {
    pub requests_per_sec: Option<f64>,
    pub p99_ms: Option<f64>,
    pub p95_ms: Option<f64>,
    pub p90_ms: Option<f64>,
    pub mean_ms: Option<f64>,
    pub max_ms: Option<f64>,
    pub stdev_ms: Option<f64>,
}

impl RequirementOverrides {
    fn entries(&self) -> [(RequirementMetric, Option<f64>); 7] {
        [
            (RequirementMetric::RequestsPerSec, self.requests_per_sec),
            (RequirementMetric::P99, self.p99_ms),
            (RequirementMetric::P95, self.p95_ms),
            (RequirementMetric::P90, self.p90_ms),
            (RequirementMetric::Mean, self.mean_ms),
            (RequirementMetric::Max, self.max_ms),
            (RequirementMetric::Stdev, self.stdev_ms),
        ]
    }
}

/// Advisory performance limits for one scenario mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeRequirements {
    pub mode: ScenarioMode,
    pub requirements: Vec<Requirement>,
}

const fn req(metric: RequirementMetric, limit: f64) -> Requirement {
    Requirement { metric, limit }
}

impl ModeRequirements {
    /// Built-in limits. Every mode also requires a 100% success rate.
    #[must_use]
    pub fn for_mode(mode: ScenarioMode) -> Self {
        let mut requirements = match mode {
            ScenarioMode::Data => vec![
                req(RequirementMetric::RequestsPerSec, 1500.0),
                req(RequirementMetric::P99, 9.0),
                req(RequirementMetric::P95, 8.0),
                req(RequirementMetric::P90, 7.0),
                req(RequirementMetric::Mean, 5.0),
                req(RequirementMetric::Max, 10.0),
                req(RequirementMetric::Stdev, 3.0),
            ],
            ScenarioMode::Mixed => vec![
                req(RequirementMetric::P99, 100.0),
                req(RequirementMetric::P95, 50.0),
                req(RequirementMetric::Mean, 20.0),
            ],
            ScenarioMode::Api => vec![
                req(RequirementMetric::P99, 100.0),
                req(RequirementMetric::P95, 50.0),
                req(RequirementMetric::P90, 30.0),
                req(RequirementMetric::Mean, 15.0),
                req(RequirementMetric::Max, 200.0),
            ],
            ScenarioMode::Symbols | ScenarioMode::Status => {
                vec![req(RequirementMetric::P99, 10_000.0)]
            }
        };
        requirements.push(req(RequirementMetric::SuccessRate, 100.0));
        Self { mode, requirements }
    }

    /// Replaces matching limits and adds the rest.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &RequirementOverrides) -> Self {
        for (metric, limit) in overrides.entries() {
            let Some(limit) = limit else {
                continue;
            };
            if let Some(existing) = self
                .requirements
                .iter_mut()
                .find(|requirement| requirement.metric == metric)
            {
                existing.limit = limit;
                continue;
            }
            self.requirements.push(req(metric, limit));
        }
        self
    }

    #[must_use]
    pub fn evaluate(&self, summary: &PerformanceSummary) -> Vec<RequirementViolation> {
        self.requirements
            .iter()
            .filter_map(|requirement| {
                let actual = requirement.metric.measure(summary);
                let violated = if requirement.metric.is_floor() {
                    actual < requirement.limit
                } else {
                    actual > requirement.limit
                };
                violated.then_some(RequirementViolation {
                    metric: requirement.metric,
                    actual,
                    limit: requirement.limit,
                })
            })
            .collect()
    }
}
