use serde::{Deserialize, Serialize};

use super::RecordId;

/// Ascending list of known record ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct Manifest {
    pub(super) records: Vec<RecordId>,
}

impl Manifest {
    pub(super) fn from_ids(mut records: Vec<RecordId>) -> Self {
        records.sort();
        records.dedup();
        Self { records }
    }

    /// Returns `true` when the id was not yet listed.
    pub(super) fn insert(&mut self, id: RecordId) -> bool {
        match self.records.binary_search(&id) {
            Ok(_) => false,
            Err(position) => {
                self.records.insert(position, id);
                true
            }
        }
    }
}
