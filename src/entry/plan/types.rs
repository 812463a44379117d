use crate::app::SuitePlan;

#[derive(Debug)]
pub(crate) enum RunPlan {
    /// History table only; no requests are sent.
    CompareOnly { results_dir: Option<String> },
    Suite(Box<SuitePlan>),
}
