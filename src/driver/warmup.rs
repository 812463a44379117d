use tracing::{debug, info};

use crate::http::{RequestExecutor, SETUP_TIMEOUT};
use crate::scenario::{Router, ScenarioMode};
use crate::shutdown::ShutdownReceiver;

const MIN_WARMUP: usize = 10;
const MAX_WARMUP: usize = 50;

/// Ten percent of the run, kept within `[10, 50]`.
#[must_use]
pub fn warmup_count(total_requests: usize) -> usize {
    (total_requests / 10).clamp(MIN_WARMUP, MAX_WARMUP)
}

/// Issues warmup requests one at a time and discards their outcomes.
/// Returns `false` when shutdown was signalled before warmup finished.
pub(super) async fn run_warmup(
    executor: &dyn RequestExecutor,
    router: &Router,
    mode: ScenarioMode,
    count: usize,
    shutdown_rx: &mut ShutdownReceiver,
) -> bool {
    info!("Running warmup ({} requests)...", count);
    for index in 0..count {
        if !shutdown_rx.is_empty() {
            return false;
        }
        let outcome = executor
            .execute(&router.next_url(mode, index), SETUP_TIMEOUT)
            .await;
        if !outcome.is_success() {
            debug!(
                "Warmup request {} returned {}",
                index,
                outcome.error.as_deref().unwrap_or("a non-200 status")
            );
        }
    }
    true
}
