mod presets;

use clap::Parser;
use std::time::Duration;

use crate::scenario::ScenarioMode;

use super::parsers::{parse_duration_arg, parse_positive_usize};
use super::types::PositiveUsize;

pub use presets::TestPreset;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Concurrent HTTP API benchmark: functional checks, latency percentiles, throughput, and regression detection against a stored baseline.",
    after_help = "Examples:
  apibench --quick
  apibench --connections 50 --requests 3000
  apibench --mode data --requests 200
  apibench --compare-only
  apibench --no-save --verbose"
)]
pub struct BenchArgs {
    /// Server URL
    #[arg(long, default_value = super::DEFAULT_URL)]
    pub url: String,

    /// Number of concurrent connections for the performance test
    #[arg(
        long,
        short = 'c',
        default_value = "20",
        value_parser = parse_positive_usize
    )]
    pub connections: PositiveUsize,

    /// Total requests for the performance test
    #[arg(
        long,
        short = 'r',
        default_value = "2000",
        value_parser = parse_positive_usize
    )]
    pub requests: PositiveUsize,

    /// Performance test mode (api = symbols and status endpoints only)
    #[arg(long, short = 'm', default_value = "data", ignore_case = true)]
    pub mode: ScenarioMode,

    /// Run quick test (10 connections, 100 requests)
    #[arg(long, short = 'q', conflicts_with_all = ["standard", "endurance"])]
    pub quick: bool,

    /// Run standard test (20 connections, 2000 requests) [default]
    #[arg(long, conflicts_with = "endurance")]
    pub standard: bool,

    /// Run endurance test (30 connections, 5000 requests)
    #[arg(long)]
    pub endurance: bool,

    /// Per-request timeout for the timed phase (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = "30s",
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Directory holding benchmark records (defaults to server/benchmark_results or benchmark_results)
    #[arg(long = "results-dir")]
    pub results_dir: Option<String>,

    /// Explicit baseline record path, checked before the default locations
    #[arg(long)]
    pub baseline: Option<String>,

    /// Path to config file (TOML/JSON). Defaults to ./apibench.toml or ./apibench.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by APIBENCH_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Do not save results to file
    #[arg(long = "no-save")]
    pub no_save: bool,

    /// Only show comparison of previous results without running a new test
    #[arg(long = "compare-only")]
    pub compare_only: bool,

    /// Skip functional endpoint checks and only run the performance test
    #[arg(long = "skip-functional")]
    pub skip_functional: bool,

    /// Disable colored progress output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl BenchArgs {
    #[must_use]
    pub const fn preset(&self) -> TestPreset {
        TestPreset::from_flags(self.quick, self.standard, self.endurance)
    }

    /// Overwrites connections/requests with the selected preset's values.
    pub fn apply_preset(&mut self) {
        if let Some((connections, requests)) = self.preset().load() {
            self.connections = connections;
            self.requests = requests;
        }
    }
}
