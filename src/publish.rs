//! Writes the manifest and state artifacts read by the presentation layer.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::IndexingEngine;
use crate::entry::Entry;
use crate::error::Error;

/// One element of the manifest array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    pub id: String,
    pub path: String,
    pub checksum: String,
    pub entropy: Option<String>,
    pub tags: Vec<String>,
}

impl From<&Entry> for ManifestRecord {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id.clone(),
            path: manifest_path(entry),
            checksum: entry.fingerprint.clone(),
            entropy: entry.entropy_tag.clone(),
            tags: entry.tags.clone(),
        }
    }
}

fn manifest_path(entry: &Entry) -> String {
    match entry.path.to_str() {
        Some(path) => path.to_owned(),
        None => {
            let lossy = entry.path.to_string_lossy().into_owned();
            debug!(id = %entry.id, path = %lossy, "non-UTF-8 path written lossily");
            lossy
        }
    }
}

/// The state artifact object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub session: String,
    pub active: usize,
    pub count: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug)]
pub struct SnapshotPublisher {
    engine: Arc<IndexingEngine>,
    manifest_path: PathBuf,
    state_path: PathBuf,
    failed_writes: AtomicUsize,
}

impl SnapshotPublisher {
    pub fn new(
        engine: Arc<IndexingEngine>,
        manifest_path: impl Into<PathBuf>,
        state_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            engine,
            manifest_path: manifest_path.into(),
            state_path: state_path.into(),
            failed_writes: AtomicUsize::new(0),
        }
    }

    /// Overwrite the manifest with the current cache snapshot.
    /// Returns the number of records written, or `None` if the write failed.
    pub fn publish_manifest(&self) -> Option<usize> {
        let records: Vec<ManifestRecord> = self
            .engine
            .cache()
            .snapshot()
            .iter()
            .map(ManifestRecord::from)
            .collect();
        self.settle(&self.manifest_path, write_json(&self.manifest_path, &records))
            .then_some(records.len())
    }

    /// Overwrite the state artifact. Returns whether the write succeeded.
    pub fn publish_state(&self) -> bool {
        let info = self.engine.snapshot_info();
        let record = StateRecord {
            session: info.session_id,
            active: info.active_index,
            count: info.count,
            timestamp: info.timestamp,
        };
        self.settle(&self.state_path, write_json(&self.state_path, &record))
    }

    /// Total writes that failed since construction.
    pub fn failed_writes(&self) -> usize {
        self.failed_writes.load(Ordering::Relaxed)
    }

    fn settle(&self, target: &Path, res: Result<(), Error>) -> bool {
        match res {
            Ok(()) => {
                debug!(path = %target.display(), "artifact written");
                true
            }
            Err(err) => {
                self.failed_writes.fetch_add(1, Ordering::Relaxed);
                warn!(path = %target.display(), "artifact write failed: {err}");
                false
            }
        }
    }
}

fn write_json<T: Serialize + ?Sized>(target: &Path, value: &T) -> Result<(), Error> {
    let mut body = serde_json::to_vec_pretty(value)?;
    body.push(b'\n');
    fs::write(target, body)?;
    Ok(())
}
