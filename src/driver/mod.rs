//! Load driver: serial warmup followed by the bounded-concurrency timed phase.
mod pool;
mod progress;
mod run_config;
mod warmup;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::http::{RequestExecutor, RequestOutcome};
use crate::scenario::Router;
use crate::shutdown::ShutdownSender;

pub use run_config::RunConfig;
pub use warmup::warmup_count;

/// Everything the timed phase produced.
#[derive(Debug)]
pub struct DriverOutput {
    pub outcomes: Vec<RequestOutcome>,
    pub elapsed: Duration,
    pub cancelled: bool,
}

pub struct LoadDriver {
    executor: Arc<dyn RequestExecutor>,
    router: Arc<Router>,
    config: RunConfig,
    request_timeout: Duration,
    no_color: bool,
}

impl LoadDriver {
    #[must_use]
    pub fn new(
        executor: Arc<dyn RequestExecutor>,
        router: Arc<Router>,
        config: RunConfig,
        request_timeout: Duration,
    ) -> Self {
        Self {
            executor,
            router,
            config,
            request_timeout,
            no_color: false,
        }
    }

    #[must_use]
    pub const fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs warmup, then the timed phase. A shutdown signal stops further
    /// dispatch; requests already in flight are still collected.
    pub async fn run(&self, shutdown: &ShutdownSender) -> DriverOutput {
        let mut shutdown_rx = shutdown.subscribe();

        let warmed = warmup::run_warmup(
            self.executor.as_ref(),
            &self.router,
            self.config.mode,
            warmup_count(self.config.total_requests.get()),
            &mut shutdown_rx,
        )
        .await;
        if !warmed {
            info!("Shutdown requested during warmup; skipping timed phase.");
            return DriverOutput {
                outcomes: Vec::new(),
                elapsed: Duration::ZERO,
                cancelled: true,
            };
        }

        let phase = pool::TimedPhase {
            executor: &self.executor,
            router: &self.router,
            config: &self.config,
            request_timeout: self.request_timeout,
            no_color: self.no_color,
        };
        phase.run(&mut shutdown_rx).await
    }
}
