use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{Application, ApplicationId, ApplicationRecord};
use super::storage::{BlobStorage, StorageError};

/// Storage key holding the JSON array of submissions.
pub const DEFAULT_STORAGE_KEY: &str = "jobApplications";
/// File name offered for the exported submission list.
pub const DEFAULT_EXPORT_FILE: &str = "candidaturas.json";

/// Millisecond wall clock used to stamp new records.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to serialize submissions: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write export to {path}: {source}")]
    Export { path: PathBuf, source: io::Error },
}

/// Ordered, append-only list of accepted applications mirrored to durable storage.
///
/// Every mutation rewrites the whole blob under the storage key. A missing or corrupt blob loads
/// as an empty list.
pub struct SubmissionStore<S> {
    storage: S,
    key: String,
    clock: Arc<dyn Clock>,
    records: Mutex<Vec<ApplicationRecord>>,
}

impl<S: BlobStorage> SubmissionStore<S> {
    /// Open the store under the default key and restore whatever the storage holds.
    pub fn open(storage: S) -> Self {
        Self::with_options(storage, DEFAULT_STORAGE_KEY, Arc::new(SystemClock))
    }

    pub fn with_options(storage: S, key: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        let store = Self {
            storage,
            key: key.into(),
            clock,
            records: Mutex::new(Vec::new()),
        };
        store.load();
        store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Re-read the durable blob, replacing the in-memory list. Unreadable storage loads as empty.
    pub fn load(&self) -> Vec<ApplicationRecord> {
        match self.refresh() {
            Ok(records) => records,
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored submissions unreadable; starting empty");
                let mut records = self.lock();
                records.clear();
                Vec::new()
            }
        }
    }

    /// Like [`load`](Self::load), but a storage read failure is returned and memory is left as is.
    /// A corrupt blob still counts as no data.
    pub fn refresh(&self) -> Result<Vec<ApplicationRecord>, StoreError> {
        let mut records = self.lock();
        *records = self.read_durable()?;
        Ok(records.clone())
    }

    fn read_durable(&self) -> Result<Vec<ApplicationRecord>, StoreError> {
        let Some(blob) = self.storage.read(&self.key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<ApplicationRecord>>(&blob) {
            Ok(records) => {
                debug!(key = %self.key, count = records.len(), "submissions restored");
                Ok(records)
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored submissions corrupt; starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Stamp the application with the next id, append it, and persist the full list.
    pub fn append(&self, application: Application) -> Result<ApplicationRecord, StoreError> {
        let mut records = self.lock();

        let now = self.clock.now_millis();
        let id = match records.last() {
            Some(last) if last.id.0 >= now => last.id.0 + 1,
            _ => now,
        };

        let record = ApplicationRecord::new(ApplicationId(id), application);
        records.push(record.clone());

        if let Err(err) = self.persist(&records) {
            records.pop();
            return Err(err);
        }

        info!(id = %record.id, total = records.len(), "submission stored");
        Ok(record)
    }

    pub fn records(&self) -> Vec<ApplicationRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Pretty JSON array of every stored record, unfiltered.
    pub fn export_all(&self) -> Result<String, StoreError> {
        let records = self.lock();
        Ok(serde_json::to_string_pretty(&*records)?)
    }

    /// Write the export artifact into `dir`, returning the file path.
    pub fn export_to(&self, dir: &Path, file_name: &str) -> Result<PathBuf, StoreError> {
        let blob = self.export_all()?;
        let path = dir.join(file_name);
        fs::write(&path, blob).map_err(|source| StoreError::Export {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "submissions exported");
        Ok(path)
    }

    /// Drop every record and delete the durable entry.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut records = self.lock();
        self.storage.remove(&self.key)?;
        let dropped = records.len();
        records.clear();
        info!(key = %self.key, dropped, "submissions cleared");
        Ok(())
    }

    fn persist(&self, records: &[ApplicationRecord]) -> Result<(), StoreError> {
        let blob = serde_json::to_string(records)?;
        self.storage.write(&self.key, &blob)?;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ApplicationRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
