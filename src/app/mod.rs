//! Suite orchestration and console reporting.
mod history;
mod report;
mod suite;


pub(crate) use history::run_compare_only;
pub(crate) use suite::{SuitePlan, run_suite};
