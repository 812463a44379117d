use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StoreError;

use super::manifest::Manifest;
use super::{RecordId, StoredRun};

pub const DEFAULT_RESULTS_DIR: &str = "benchmark_results";
/// Preferred results directory when running from a repository root.
pub const SERVER_RESULTS_DIR: &str = "server/benchmark_results";
pub const BASELINE_FILE: &str = "benchmark_baseline.json";
pub const MANIFEST_FILE: &str = "manifest.json";
const SERVER_DIR: &str = "server";
const RECORD_PREFIX: &str = "benchmark_";

#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
    root: PathBuf,
}

impl ResultStore {
    /// Store rooted at `dir`; baseline lookups fall back to the working
    /// directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            root: PathBuf::from("."),
        }
    }

    #[must_use]
    pub fn resolve_default() -> Self {
        Self::resolve_in(Path::new("."))
    }

    /// `server/benchmark_results` under `root` if it exists, otherwise
    /// `benchmark_results`.
    #[must_use]
    pub fn resolve_in(root: &Path) -> Self {
        let server_dir = root.join(SERVER_RESULTS_DIR);
        let dir = if server_dir.is_dir() {
            server_dir
        } else {
            root.join(DEFAULT_RESULTS_DIR)
        };
        Self {
            dir,
            root: root.to_path_buf(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn record_path(&self, id: &RecordId) -> PathBuf {
        self.dir.join(id.file_name())
    }

    /// Writes `run` under a fresh id for the current second.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory, record, or manifest cannot be
    /// written.
    pub fn persist(&self, run: &StoredRun) -> Result<RecordId, StoreError> {
        let id = RecordId::now();
        self.persist_as(&id, run)?;
        Ok(id)
    }

    /// Writes `run` as `id`, overwriting an existing record with that id.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory, record, or manifest cannot be
    /// written.
    pub fn persist_as(&self, id: &RecordId, run: &StoredRun) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        let encoded =
            serde_json::to_vec_pretty(run).map_err(|source| StoreError::Encode { source })?;
        write_atomic(&self.record_path(id), &encoded)?;

        let (mut manifest, rebuilt) = match self.read_manifest()? {
            Some(manifest) => (manifest, false),
            None => (Manifest::from_ids(self.scan_records()?), true),
        };
        if manifest.insert(id.clone()) || rebuilt {
            self.write_manifest(&manifest)?;
        }
        debug!("Stored run {} in {}", id, self.dir.display());
        Ok(())
    }

    /// Known record ids, oldest first. Rebuilds a missing manifest from
    /// the record files on disk.
    ///
    /// # Errors
    ///
    /// Returns an error when the manifest or directory cannot be read.
    pub fn list_records(&self) -> Result<Vec<RecordId>, StoreError> {
        if let Some(manifest) = self.read_manifest()? {
            return Ok(manifest.records);
        }
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let manifest = Manifest::from_ids(self.scan_records()?);
        if !manifest.records.is_empty() {
            debug!(
                "Rebuilt manifest with {} records in {}",
                manifest.records.len(),
                self.dir.display()
            );
            self.write_manifest(&manifest)?;
        }
        Ok(manifest.records)
    }

    /// # Errors
    ///
    /// Returns an error when the record cannot be read or decoded.
    pub fn load(&self, id: &RecordId) -> Result<StoredRun, StoreError> {
        Self::load_path(&self.record_path(id))
    }

    /// # Errors
    ///
    /// Returns an error when the file cannot be read or decoded.
    pub fn load_path(path: &Path) -> Result<StoredRun, StoreError> {
        let raw = fs::read(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&raw).map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Baseline locations in lookup order; an explicit path comes first.
    #[must_use]
    pub fn baseline_candidates(&self, explicit: Option<&Path>) -> Vec<PathBuf> {
        let mut candidates = Vec::with_capacity(4);
        if let Some(path) = explicit {
            candidates.push(path.to_path_buf());
        }
        candidates.push(self.dir.join(BASELINE_FILE));
        candidates.push(self.root.join(BASELINE_FILE));
        candidates.push(self.root.join(SERVER_DIR).join(BASELINE_FILE));
        candidates
    }

    /// First existing baseline candidate.
    #[must_use]
    pub fn find_baseline(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit
            && !path.is_file()
        {
            warn!("Baseline '{}' does not exist.", path.display());
        }
        self.baseline_candidates(explicit)
            .into_iter()
            .find(|path| path.is_file())
    }

    fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }

    fn read_manifest(&self) -> Result<Option<Manifest>, StoreError> {
        let path = self.manifest_path();
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(|source| StoreError::Decode { path, source })
    }

    fn write_manifest(&self, manifest: &Manifest) -> Result<(), StoreError> {
        let encoded =
            serde_json::to_vec_pretty(manifest).map_err(|source| StoreError::Encode { source })?;
        write_atomic(&self.manifest_path(), &encoded)
    }

    fn scan_records(&self) -> Result<Vec<RecordId>, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| StoreError::Read {
            path: self.dir.clone(),
            source,
        })?;
        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Read {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if !stem.starts_with(RECORD_PREFIX) {
                continue;
            }
            match RecordId::parse(stem) {
                Ok(id) => ids.push(id),
                Err(err) => debug!("Skipping {}: {}", path.display(), err),
            }
        }
        Ok(ids)
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).map_err(|source| StoreError::Write {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}
