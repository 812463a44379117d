use tracing::debug;

use crate::app::{run_compare_only, run_suite};
use crate::error::AppResult;
use crate::shutdown::{shutdown_channel, spawn_signal_handler};

use super::types::RunPlan;

pub(crate) async fn execute_plan(plan: &RunPlan) -> AppResult<bool> {
    match plan {
        RunPlan::CompareOnly { results_dir } => {
            run_compare_only(results_dir.as_deref())?;
            Ok(true)
        }
        RunPlan::Suite(plan) => {
            let (shutdown_tx, _) = shutdown_channel();
            let signal_handle = spawn_signal_handler(&shutdown_tx);

            let result = run_suite(plan, &shutdown_tx).await;

            if shutdown_tx.send(()).is_err() {
                debug!("Signal handler already stopped.");
            }
            signal_handle.await?;
            result
        }
    }
}
