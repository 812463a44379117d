use chrono::Local;

use crate::driver::RunConfig;
use crate::functional::CheckLedger;
use crate::metrics::{PerformanceSummary, RunStats};
use crate::scenario::RequirementViolation;

const WIDE_RULE: usize = 70;
const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

pub(super) fn rule(ch: char) -> String {
    ch.to_string().repeat(WIDE_RULE)
}

pub(super) fn print_banner(url: &str) {
    println!("\n{}", rule('='));
    println!("CHART SERVER API - COMPREHENSIVE TEST SUITE");
    println!("{}", rule('='));
    println!("Server: {}", url);
    println!("Time: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
}

pub(super) fn print_phase(title: &str) {
    println!("\n{}", rule('-'));
    println!("{}", title);
    println!("{}", rule('-'));
}

pub(super) fn print_configuration(config: &RunConfig, symbols: &[String]) {
    println!("\n{}", "=".repeat(60));
    println!("PERFORMANCE BENCHMARK");
    println!("{}", "=".repeat(60));
    println!("Configuration:");
    println!("  - Connections: {}", config.concurrency.get());
    println!("  - Total requests: {}", config.total_requests.get());
    println!("  - Mode: {}", config.mode);
    println!("  - Symbols: {}", symbols.join(", "));
    println!();
}

pub(super) fn print_results(ledger: &CheckLedger, stats: &RunStats) {
    println!("\n{}", rule('='));
    println!("TEST RESULTS SUMMARY");
    println!("{}", rule('='));

    println!("\nFunctional Tests:");
    println!("  ✓ Passed: {}", ledger.passed().len());
    println!("  ✗ Failed: {}", ledger.failed().len());
    if !ledger.latencies().is_empty() {
        println!("\nCheck Latencies:");
        for (name, latency_ms) in ledger.latencies() {
            println!("    - {}: {:.2}ms", name, latency_ms);
        }
    }
    if !ledger.failed().is_empty() {
        println!("\nFailed Tests:");
        for failure in ledger.failed() {
            println!("    - {}", failure);
        }
    }

    match stats {
        RunStats::Measured(summary) => print_performance(summary),
        RunStats::Degraded(degraded) => {
            println!("\nPerformance Metrics:");
            println!("  ❌ {}", degraded.error);
            println!(
                "    - Total: {}, Failed: {}",
                degraded.total, degraded.failed
            );
        }
    }

    println!("\n{}", rule('='));
    let total = ledger.total();
    if ledger.all_passed() {
        println!("✅ ALL TESTS PASSED: {}/{}", total, total);
    } else {
        println!(
            "⚠️  PARTIAL SUCCESS: {}/{} tests passed",
            ledger.passed().len(),
            total
        );
    }
}

fn print_performance(summary: &PerformanceSummary) {
    let success_pct = if summary.total == 0 {
        0.0
    } else {
        summary.successful as f64 * 100.0 / summary.total as f64
    };
    let latency = &summary.latency;

    println!("\nPerformance Metrics:");
    println!("  Requests:");
    println!("    - Total: {}", summary.total);
    println!(
        "    - Successful: {} ({:.1}%)",
        summary.successful, success_pct
    );
    println!("    - Failed: {}", summary.failed);

    println!("\n  Throughput:");
    println!("    - Requests/sec: {:.2}", summary.requests_per_sec);
    println!(
        "    - Data: {:.2} MB",
        summary.total_bytes as f64 / BYTES_PER_MIB
    );
    println!("    - Bandwidth: {:.2} Mbps", summary.throughput_mbps);

    println!("\n  Latency (ms):");
    println!("    - Min: {:.2}", latency.min);
    println!("    - Mean: {:.2}", latency.mean);
    println!("    - Median: {:.2}", latency.median);
    println!("    - P90: {:.2}", latency.p90);
    println!("    - P95: {:.2}", latency.p95);
    println!("    - P99: {:.2}", latency.p99);
    println!("    - Max: {:.2}", latency.max);
    println!("    - StdDev: {:.2}", latency.stdev);
}

pub(super) fn print_requirements(violations: &[RequirementViolation]) {
    if violations.is_empty() {
        println!("✅ PERFORMANCE MEETS ALL REQUIREMENTS");
        return;
    }
    println!("❌ PERFORMANCE REQUIREMENTS NOT MET:");
    for violation in violations {
        println!("   - {}", violation);
    }
}
