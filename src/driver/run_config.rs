use serde::{Deserialize, Serialize};

use crate::args::PositiveUsize;
use crate::scenario::ScenarioMode;

/// Load shape of one run, persisted as `{connections, requests, mode}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(rename = "connections")]
    pub concurrency: PositiveUsize,
    #[serde(rename = "requests")]
    pub total_requests: PositiveUsize,
    pub mode: ScenarioMode,
}
