//! Functional endpoint checks run before the load phase.
mod checks;
mod ledger;
mod schema;


pub use checks::run_functional_checks;
pub use ledger::{CheckLedger, FunctionalTally};
pub use schema::{ColumnInfo, DataHeader, ExchangeStatus, StatusResponse, split_data_response};
