use thiserror::Error;

use super::StoreError;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("Need at least {required} benchmark results to compare, found {found}.")]
    NotEnoughRecords { required: usize, found: usize },
    #[error("Could not load {label}: {source}")]
    Unreadable {
        label: String,
        #[source]
        source: StoreError,
    },
}
