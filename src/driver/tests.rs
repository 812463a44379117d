use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::*;
use crate::args::PositiveUsize;
use crate::http::{RequestExecutor, RequestOutcome};
use crate::scenario::{Router, ScenarioMode};
use crate::shutdown::{ShutdownSender, shutdown_channel};

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

#[derive(Default)]
struct FakeExecutor {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    urls: Mutex<Vec<String>>,
    delay: Duration,
    shutdown_at_call: Option<(usize, ShutdownSender)>,
}

#[async_trait]
impl RequestExecutor for FakeExecutor {
    async fn execute(&self, url: &str, _timeout: Duration) -> RequestOutcome {
        let call = self.calls.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        self.urls.lock().await.push(url.to_owned());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some((at, shutdown)) = self.shutdown_at_call.as_ref()
            && *at == call
        {
            drop(shutdown.send(()));
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        RequestOutcome {
            status_code: 200,
            latency_ms: 1.0,
            byte_count: 10,
            error: None,
        }
    }
}

fn run_config(concurrency: usize, total: usize, mode: ScenarioMode) -> Result<RunConfig, String> {
    Ok(RunConfig {
        concurrency: PositiveUsize::try_from(concurrency).map_err(|err| err.to_string())?,
        total_requests: PositiveUsize::try_from(total).map_err(|err| err.to_string())?,
        mode,
    })
}

fn router() -> Result<Arc<Router>, String> {
    Router::new("http://127.0.0.1:1", vec!["A".to_owned(), "B".to_owned()])
        .map(Arc::new)
        .map_err(|err| err.to_string())
}

#[test]
fn warmup_count_is_clamped() -> Result<(), String> {
    let cases = [(1, 10), (100, 10), (200, 20), (499, 49), (2000, 50), (5000, 50)];
    for (total, expected) in cases {
        if warmup_count(total) != expected {
            return Err(format!(
                "warmup_count({}) = {}, expected {}",
                total,
                warmup_count(total),
                expected
            ));
        }
    }
    Ok(())
}

#[test]
fn completes_exactly_total_requests() -> Result<(), String> {
    run_async_test(async {
        let executor = Arc::new(FakeExecutor::default());
        let driver = LoadDriver::new(
            executor.clone(),
            router()?,
            run_config(4, 37, ScenarioMode::Data)?,
            Duration::from_secs(1),
        );
        let (shutdown_tx, _) = shutdown_channel();
        let output = driver.run(&shutdown_tx).await;
        if output.outcomes.len() != 37 || output.cancelled {
            return Err(format!(
                "Unexpected output: {} outcomes, cancelled={}",
                output.outcomes.len(),
                output.cancelled
            ));
        }
        let calls = executor.calls.load(Ordering::SeqCst);
        if calls != 37_usize.saturating_add(warmup_count(37)) {
            return Err(format!("Unexpected executor calls: {}", calls));
        }
        Ok(())
    })
}

#[test]
fn runs_exactly_concurrency_workers() -> Result<(), String> {
    run_async_test(async {
        let executor = Arc::new(FakeExecutor {
            delay: Duration::from_millis(5),
            ..FakeExecutor::default()
        });
        let driver = LoadDriver::new(
            executor.clone(),
            router()?,
            run_config(3, 30, ScenarioMode::Symbols)?,
            Duration::from_secs(1),
        );
        let (shutdown_tx, _) = shutdown_channel();
        let output = driver.run(&shutdown_tx).await;
        if output.outcomes.len() != 30 {
            return Err(format!("Unexpected outcomes: {}", output.outcomes.len()));
        }
        let peak = executor.peak_in_flight.load(Ordering::SeqCst);
        if peak != 3 {
            return Err(format!("Expected exactly 3 requests in flight, peak was {}", peak));
        }
        Ok(())
    })
}

#[test]
fn shutdown_stops_dispatch() -> Result<(), String> {
    run_async_test(async {
        let (shutdown_tx, _) = shutdown_channel();
        let warmup = warmup_count(40);
        let executor = Arc::new(FakeExecutor {
            delay: Duration::from_millis(2),
            shutdown_at_call: Some((warmup.saturating_add(3), shutdown_tx.clone())),
            ..FakeExecutor::default()
        });
        let driver = LoadDriver::new(
            executor.clone(),
            router()?,
            run_config(1, 40, ScenarioMode::Status)?,
            Duration::from_secs(1),
        );
        let output = driver.run(&shutdown_tx).await;
        if !output.cancelled {
            return Err("Expected cancelled run".to_owned());
        }
        if output.outcomes.is_empty() || output.outcomes.len() >= 40 {
            return Err(format!("Unexpected outcomes: {}", output.outcomes.len()));
        }
        Ok(())
    })
}

#[test]
fn timed_phase_follows_router_rotation() -> Result<(), String> {
    run_async_test(async {
        let executor = Arc::new(FakeExecutor::default());
        let driver = LoadDriver::new(
            executor.clone(),
            router()?,
            run_config(1, 6, ScenarioMode::Mixed)?,
            Duration::from_secs(1),
        );
        let (shutdown_tx, _) = shutdown_channel();
        driver.run(&shutdown_tx).await;
        let urls = executor.urls.lock().await;
        let timed: Vec<&String> = urls.iter().skip(warmup_count(6)).collect();
        let symbols = timed.iter().filter(|url| url.ends_with("/api/symbols")).count();
        let status = timed.iter().filter(|url| url.ends_with("/api/status")).count();
        let data = timed.iter().filter(|url| url.contains("/api/data?")).count();
        if (symbols, status, data) != (2, 2, 2) {
            return Err(format!("Unexpected mix: {:?}", timed));
        }
        Ok(())
    })
}
