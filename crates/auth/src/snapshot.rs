//! Durable snapshot storage.
//!
//! A snapshot is an opaque string record stored under a well-known key, much
//! like a browser's key/value storage. The session layer owns the encoding;
//! stores only move strings around.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use thiserror::Error;

/// Default key the session snapshot is stored under.
pub const DEFAULT_SNAPSHOT_KEY: &str = "auth";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Stored data exists but cannot be decoded.
    #[error("snapshot corrupt: {0}")]
    Corrupt(String),

    /// The backing storage could not be read or written.
    #[error("snapshot storage error: {0}")]
    Io(String),
}

/// Persistence adapter for session snapshots.
pub trait SnapshotStore: Send + Sync {
    /// Read the record under `key`. `Ok(None)` when absent.
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError>;

    /// Write (replace) the record under `key`.
    fn save(&self, key: &str, record: &str) -> Result<(), SnapshotError>;

    /// Delete the record under `key`. Deleting an absent record is not an error.
    fn clear(&self, key: &str) -> Result<(), SnapshotError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory snapshot store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    records: RwLock<HashMap<String, String>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a record exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.records
            .read()
            .map(|records| records.contains_key(key))
            .unwrap_or(false)
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        let records = self
            .records
            .read()
            .map_err(|_| SnapshotError::Io("snapshot store poisoned".to_string()))?;
        Ok(records.get(key).cloned())
    }

    fn save(&self, key: &str, record: &str) -> Result<(), SnapshotError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| SnapshotError::Io("snapshot store poisoned".to_string()))?;
        records.insert(key.to_string(), record.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), SnapshotError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| SnapshotError::Io("snapshot store poisoned".to_string()))?;
        records.remove(key);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File store
// ─────────────────────────────────────────────────────────────────────────────

/// File-backed snapshot store.
///
/// The file holds a JSON object mapping keys to records. Every write replaces
/// the whole file (write to a sibling temp file, then rename).
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<BTreeMap<String, String>, SnapshotError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(SnapshotError::Io(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            SnapshotError::Corrupt(format!("{} is not a key/value object: {e}", self.path.display()))
        })
    }

    /// Records to write back on top of. A corrupt file is discarded.
    fn records_for_write(&self) -> Result<BTreeMap<String, String>, SnapshotError> {
        match self.read_records() {
            Ok(records) => Ok(records),
            Err(SnapshotError::Corrupt(reason)) => {
                tracing::warn!(%reason, "discarding corrupt snapshot file");
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e),
        }
    }

    fn write_records(&self, records: &BTreeMap<String, String>) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SnapshotError::Io(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let body = serde_json::to_string_pretty(records)
            .map_err(|e| SnapshotError::Io(format!("failed to encode snapshot file: {e}")))?;

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, body)
            .map_err(|e| SnapshotError::Io(format!("failed to write {}: {e}", tmp.display())))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            SnapshotError::Io(format!("failed to replace {}: {e}", self.path.display()))
        })
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        Ok(self.read_records()?.remove(key))
    }

    fn save(&self, key: &str, record: &str) -> Result<(), SnapshotError> {
        let mut records = self.records_for_write()?;
        records.insert(key.to_string(), record.to_string());
        self.write_records(&records)
    }

    fn clear(&self, key: &str) -> Result<(), SnapshotError> {
        let mut records = self.records_for_write()?;
        records.remove(key);
        if records.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(SnapshotError::Io(format!(
                    "failed to remove {}: {e}",
                    self.path.display()
                ))),
            };
        }
        self.write_records(&records)
    }
}
