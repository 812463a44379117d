use serde::{Deserialize, Serialize};

/// Persisted pass/fail counts and check names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionalTally {
    pub passed: usize,
    pub failed: usize,
    pub passed_tests: Vec<String>,
    pub failed_tests: Vec<String>,
}

/// Accumulates check results; threaded through every check and returned.
#[derive(Debug, Clone, Default)]
pub struct CheckLedger {
    passed: Vec<String>,
    failed: Vec<String>,
    latencies: Vec<(String, f64)>,
}

impl CheckLedger {
    pub fn pass(&mut self, name: impl Into<String>) {
        self.passed.push(name.into());
    }

    /// Records a failure as `"<name>: <reason>"`.
    pub fn fail(&mut self, name: &str, reason: impl std::fmt::Display) {
        self.failed.push(format!("{}: {}", name, reason));
    }

    /// Records a failure carrying only the check name.
    pub fn fail_bare(&mut self, name: impl Into<String>) {
        self.failed.push(name.into());
    }

    pub fn record_latency(&mut self, name: impl Into<String>, latency_ms: f64) {
        self.latencies.push((name.into(), latency_ms));
    }

    #[must_use]
    pub fn passed(&self) -> &[String] {
        &self.passed
    }

    #[must_use]
    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    #[must_use]
    pub fn latencies(&self) -> &[(String, f64)] {
        &self.latencies
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.passed.len().saturating_add(self.failed.len())
    }

    #[must_use]
    pub fn tally(&self) -> FunctionalTally {
        FunctionalTally {
            passed: self.passed.len(),
            failed: self.failed.len(),
            passed_tests: self.passed.clone(),
            failed_tests: self.failed.clone(),
        }
    }
}
