use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use tracing::{info, warn};

use crate::args::BenchArgs;
use crate::driver::{LoadDriver, RunConfig};
use crate::error::AppResult;
use crate::functional::{CheckLedger, run_functional_checks};
use crate::http::{CONNECTIVITY_TIMEOUT, HttpExecutor, RequestExecutor, build_client, discover_symbols};
use crate::metrics::summarize;
use crate::scenario::{ModeRequirements, Router};
use crate::shutdown::ShutdownSender;
use crate::store::StoredRun;

use super::history::{compare_with_history, resolve_store};
use super::report;

/// Everything a full suite run needs, resolved from CLI and config.
#[derive(Debug, Clone)]
pub(crate) struct SuitePlan {
    pub(crate) args: BenchArgs,
    pub(crate) requirements: ModeRequirements,
}

/// Connectivity check, functional checks, timed load, report, persistence,
/// and history comparison. Returns whether every functional check passed.
///
/// # Errors
///
/// Returns an error when the HTTP client or the router cannot be built.
pub(crate) async fn run_suite(plan: &SuitePlan, shutdown_tx: &ShutdownSender) -> AppResult<bool> {
    let args = &plan.args;
    let client = build_client(args.connections.get())?;
    let executor = Arc::new(HttpExecutor::new(client));
    let base_router = Router::new(&args.url, Vec::new())?;

    report::print_banner(&args.url);

    println!("\nTesting connectivity...");
    let reachability = executor
        .execute(base_router.symbols_url(), CONNECTIVITY_TIMEOUT)
        .await;
    if !reachability.is_success() {
        println!(
            "❌ Cannot connect to server: {}",
            reachability.error.as_deref().unwrap_or("unexpected response")
        );
        return Ok(false);
    }
    println!("✓ Server is accessible");

    let ledger = if args.skip_functional {
        info!("Skipping functional checks.");
        CheckLedger::default()
    } else {
        report::print_phase("FUNCTIONAL TESTS");
        run_functional_checks(&executor, &base_router).await
    };

    report::print_phase("PERFORMANCE TESTS");
    let symbols = discover_symbols(&executor, base_router.symbols_url()).await;
    let router = Arc::new(Router::new(&args.url, symbols)?);
    let config = RunConfig {
        concurrency: args.connections,
        total_requests: args.requests,
        mode: args.mode,
    };
    report::print_configuration(&config, router.symbols());

    let shared: Arc<dyn RequestExecutor> = executor;
    let driver = LoadDriver::new(shared, Arc::clone(&router), config, args.request_timeout)
        .with_no_color(args.no_color);
    let output = driver.run(shutdown_tx).await;
    if output.cancelled {
        warn!(
            "Run cancelled after {} timed requests; results will not be saved.",
            output.outcomes.len()
        );
    }

    let stats = summarize(&output.outcomes, output.elapsed);
    report::print_results(&ledger, &stats);
    if let Some(summary) = stats.measured() {
        report::print_requirements(&plan.requirements.evaluate(summary));
    }

    let run = StoredRun::new(&args.url, config, ledger.tally(), stats, &Local::now());
    let store = resolve_store(args.results_dir.as_deref());
    let saved = if args.no_save || output.cancelled {
        None
    } else {
        match store.persist(&run) {
            Ok(id) => {
                println!("\n💾 Results saved to: {}", store.record_path(&id).display());
                Some(id)
            }
            Err(err) => {
                warn!("Failed to save results: {}", err);
                None
            }
        }
    };

    if !output.cancelled {
        compare_with_history(
            &store,
            &run,
            args.baseline.as_deref().map(Path::new),
            saved.as_ref(),
        );
    }

    Ok(ledger.all_passed())
}
