mod support_server;

use std::fs;
use std::thread;
use std::time::Duration;

use tempfile::tempdir;

use support_server::{closed_port_url, describe, run_apibench, spawn_api_server_or_skip};

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn e2e_quick_run_without_saving() -> Result<(), String> {
    let Some((url, _server)) = spawn_api_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_apibench(
        dir.path(),
        ["--url", url.as_str(), "--quick", "--skip-functional", "--no-save", "--no-color"],
    )?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let stdout = stdout_of(&output);
    for expected in [
        "Running QUICK test (10 connections, 100 requests)...",
        "Symbols: BTC-USD, ETH-USD",
        "TEST RESULTS SUMMARY",
        "Total: 100",
        "ALL TESTS PASSED: 0/0",
    ] {
        if !stdout.contains(expected) {
            return Err(format!("missing '{}' in output\n{}", expected, describe(&output)));
        }
    }
    if dir.path().join("benchmark_results").exists() {
        return Err("--no-save still created a results directory".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_functional_checks_report_every_check() -> Result<(), String> {
    let Some((url, _server)) = spawn_api_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_apibench(
        dir.path(),
        ["--url", url.as_str(), "--requests", "20", "--connections", "2", "--no-save"],
    )?;
    let stdout = stdout_of(&output);
    for expected in [
        "FUNCTIONAL TESTS",
        "Functional Tests:",
        "Check Latencies:",
        "symbols_latency:",
        "PERFORMANCE TESTS",
    ] {
        if !stdout.contains(expected) {
            return Err(format!("missing '{}' in output\n{}", expected, describe(&output)));
        }
    }
    Ok(())
}

#[test]
fn e2e_unreachable_server_exits_nonzero() -> Result<(), String> {
    let url = closed_port_url()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_apibench(dir.path(), ["--url", url.as_str(), "--quick", "--no-save"])?;
    if output.status.success() {
        return Err(format!("expected failure\n{}", describe(&output)));
    }
    if !stdout_of(&output).contains("Cannot connect to server") {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_compare_only_needs_two_records() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_apibench(dir.path(), ["--compare-only", "--results-dir", "results"])?;
    if output.status.success() {
        return Err(format!("expected usage error\n{}", describe(&output)));
    }
    if !String::from_utf8_lossy(&output.stderr).contains("at least 2") {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_saved_runs_feed_history() -> Result<(), String> {
    let Some((url, _server)) = spawn_api_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let run_args = [
        "--url",
        url.as_str(),
        "--requests",
        "30",
        "--connections",
        "3",
        "--mode",
        "mixed",
        "--skip-functional",
        "--results-dir",
        "results",
    ];

    let first = run_apibench(dir.path(), run_args)?;
    if !first.status.success() {
        return Err(describe(&first));
    }
    let first_stdout = stdout_of(&first);
    if !first_stdout.contains("Results saved to:") || !first_stdout.contains("No baseline found") {
        return Err(describe(&first));
    }
    if !first_stdout.contains("No previous results to compare with.") {
        return Err(describe(&first));
    }

    // Record ids have one-second resolution.
    thread::sleep(Duration::from_millis(1100));

    let second = run_apibench(dir.path(), run_args)?;
    if !second.status.success() {
        return Err(describe(&second));
    }
    let second_stdout = stdout_of(&second);
    if !second_stdout.contains("COMPARISON WITH PREVIOUS RUN")
        || !second_stdout.contains("HISTORICAL TREND")
    {
        return Err(describe(&second));
    }

    let manifest = fs::read_to_string(dir.path().join("results").join("manifest.json"))
        .map_err(|err| format!("read manifest failed: {}", err))?;
    if manifest.matches("benchmark_").count() != 2 {
        return Err(format!("unexpected manifest: {}", manifest));
    }

    let history = run_apibench(dir.path(), ["--compare-only", "--results-dir", "results"])?;
    if !history.status.success() {
        return Err(describe(&history));
    }
    let history_stdout = stdout_of(&history);
    if !history_stdout.contains("BENCHMARK RESULTS COMPARISON") || !history_stdout.contains("mixed") {
        return Err(describe(&history));
    }
    Ok(())
}
