//! Result store: timestamped JSON run records plus a manifest index.
mod manifest;
mod record;
mod results;


pub use record::{RecordId, StoredRun};
pub use results::{
    BASELINE_FILE, DEFAULT_RESULTS_DIR, MANIFEST_FILE, ResultStore, SERVER_RESULTS_DIR,
};
