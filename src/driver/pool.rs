use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{error, info};

use crate::http::{RequestExecutor, RequestOutcome};
use crate::scenario::Router;
use crate::shutdown::ShutdownReceiver;

use super::progress::ProgressReporter;
use super::{DriverOutput, RunConfig};

pub(super) struct TimedPhase<'driver> {
    pub(super) executor: &'driver Arc<dyn RequestExecutor>,
    pub(super) router: &'driver Arc<Router>,
    pub(super) config: &'driver RunConfig,
    pub(super) request_timeout: Duration,
    pub(super) no_color: bool,
}

impl TimedPhase<'_> {
    pub(super) async fn run(&self, shutdown_rx: &mut ShutdownReceiver) -> DriverOutput {
        let total = self.config.total_requests.get();
        let concurrency = self.config.concurrency.get();
        let mode = self.config.mode;
        info!(
            "Running {} {} requests over {} connections...",
            total, mode, concurrency
        );

        let permits = Arc::new(Semaphore::new(concurrency));
        let completed = Arc::new(AtomicU64::new(0));
        let progress = ProgressReporter::spawn(
            Arc::clone(&completed),
            u64::try_from(total).unwrap_or(u64::MAX),
            self.no_color,
        );

        let mut tasks = JoinSet::new();
        let mut cancelled = false;
        let started = Instant::now();

        for index in 0..total {
            let permit = tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    cancelled = true;
                    break;
                }
                permit = Arc::clone(&permits).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(err) => {
                        error!("Request permits closed: {}", err);
                        cancelled = true;
                        break;
                    }
                },
            };

            let url = self.router.next_url(mode, index);
            let executor = Arc::clone(self.executor);
            let completed = Arc::clone(&completed);
            let timeout = self.request_timeout;
            tasks.spawn(async move {
                let outcome = executor.execute(&url, timeout).await;
                completed.fetch_add(1, Ordering::Relaxed);
                drop(permit);
                outcome
            });
        }

        let mut outcomes = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    error!("Request task failed: {}", err);
                    outcomes.push(RequestOutcome::transport_failure(
                        0.0,
                        format!("Request task failed: {}", err),
                    ));
                }
            }
        }
        let elapsed = started.elapsed();
        progress.finish().await;

        if cancelled {
            info!(
                "Shutdown requested; collected {} of {} requests.",
                outcomes.len(),
                total
            );
        }

        DriverOutput {
            outcomes,
            elapsed,
            cancelled,
        }
    }
}
