use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::cache::BoundedCache;
use crate::config::{Configuration, normalize_path};
use crate::cursor::RotationCursor;
use crate::entropy::EntropySource;
use crate::entry::Entry;
use crate::fingerprint::fingerprint;
use crate::scan::{DEFAULT_EXTENSIONS, scan_root};

/// Mutable runtime bookkeeping owned by one [`IndexingEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeState {
    /// Fixed for the lifetime of the engine.
    pub session_id: String,
    pub active_index: usize,
    pub last_sync_time: Option<DateTime<Utc>>,
    /// At least one rebuild has completed.
    pub hydrated: bool,
}

/// Read-only composite handed to the publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotInfo {
    pub session_id: String,
    pub active_index: usize,
    pub count: usize,
    pub timestamp: DateTime<Utc>,
}

/// Outcome counts of one [`IndexingEngine::rebuild_index`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildReport {
    /// Files that matched the extension allow-list.
    pub discovered: usize,
    pub ingested: usize,
    /// Files that could not be read and were left out.
    pub skipped: usize,
    pub elapsed: Duration,
}

/// Owns the cache, cursor and runtime state; turns files under `root` into
/// cache entries and rotates through them.
#[derive(Debug)]
pub struct IndexingEngine {
    root: PathBuf,
    extensions: Vec<String>,
    cache: BoundedCache,
    cursor: RotationCursor,
    entropy: EntropySource,
    state: Mutex<RuntimeState>,
    active: AtomicBool,
}

impl IndexingEngine {
    /// Engine over `root` using the default extension allow-list.
    /// A relative `root` is resolved against the current directory.
    pub fn new(root: impl Into<PathBuf>, capacity: usize) -> Self {
        Self::with_parts(
            root.into(),
            DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            capacity,
            EntropySource::new(),
        )
    }

    pub fn from_config(cfg: &Configuration) -> Self {
        Self::with_parts(
            cfg.wallpaper_root.clone(),
            cfg.extensions.clone(),
            cfg.cache_capacity,
            EntropySource::new(),
        )
    }

    pub fn with_parts(
        root: PathBuf,
        extensions: Vec<String>,
        capacity: usize,
        entropy: EntropySource,
    ) -> Self {
        let root = normalize_path(&root).unwrap_or(root);
        Self {
            root,
            extensions,
            cache: BoundedCache::new(capacity),
            cursor: RotationCursor::new(),
            entropy,
            state: Mutex::new(RuntimeState {
                session_id: Uuid::new_v4().simple().to_string(),
                active_index: 0,
                last_sync_time: None,
                hydrated: false,
            }),
            active: AtomicBool::new(false),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cache(&self) -> &BoundedCache {
        &self.cache
    }

    pub fn cursor(&self) -> &RotationCursor {
        &self.cursor
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Mark the engine active and rebuild immediately.
    pub fn activate(&self) -> RebuildReport {
        if !self.active.swap(true, Ordering::SeqCst) {
            info!(root = %self.root.display(), "engine activated");
        }
        self.rebuild_index()
    }

    /// Mark the engine inactive. The cache is kept and stays servable.
    pub fn deactivate(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            info!("engine deactivated");
        }
    }

    /// Scan the root and store one fresh entry per readable matching file.
    ///
    /// Entries of files that disappeared are not removed here; they age out
    /// through capacity eviction.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn rebuild_index(&self) -> RebuildReport {
        let started = Instant::now();
        let mut report = self.ingest_files(scan_root(&self.root, self.extensions.as_slice()));

        {
            let mut state = self.state();
            state.last_sync_time = Some(Utc::now());
            state.hydrated = true;
        }
        report.elapsed = started.elapsed();
        info!(
            discovered = report.discovered,
            ingested = report.ingested,
            skipped = report.skipped,
            cached = self.cache.len(),
            "rebuild complete"
        );
        report
    }

    /// Store an entry for every readable file in `files`, in order.
    /// Unreadable files are counted as skipped and do not stop the pass.
    pub fn ingest_files(&self, files: impl IntoIterator<Item = PathBuf>) -> RebuildReport {
        let mut report = RebuildReport::default();
        for path in files {
            report.discovered += 1;
            match self.ingest(path) {
                Some(entry) => {
                    if let Some(evicted) = self.cache.store(entry) {
                        debug!(path = %evicted.path.display(), "evicted");
                    }
                    report.ingested += 1;
                }
                None => report.skipped += 1,
            }
        }
        report
    }

    fn ingest(&self, path: PathBuf) -> Option<Entry> {
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(path = %path.display(), %err, "skipping unreadable file");
                return None;
            }
        };
        let parent = path
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Some(Entry {
            id: Uuid::new_v4().simple().to_string(),
            fingerprint: fingerprint(&bytes),
            created_at: Utc::now(),
            tags: vec![parent],
            entropy_tag: Some(self.entropy.rotate()),
            path,
        })
    }

    /// Advance to the next entry of the current snapshot.
    ///
    /// Returns `None` on an empty cache, leaving the active index untouched.
    pub fn select_next(&self) -> Option<Entry> {
        let mut snapshot = self.cache.snapshot();
        if snapshot.is_empty() {
            return None;
        }
        let idx = {
            let mut state = self.state();
            let idx = self.cursor.advance(snapshot.len());
            state.active_index = idx;
            idx
        };
        debug!(idx, path = %snapshot[idx].path.display(), "selected");
        Some(snapshot.swap_remove(idx))
    }

    pub fn snapshot_info(&self) -> SnapshotInfo {
        let (session_id, active_index) = {
            let state = self.state();
            (state.session_id.clone(), state.active_index)
        };
        SnapshotInfo {
            session_id,
            active_index,
            count: self.cache.len(),
            timestamp: Utc::now(),
        }
    }

    pub fn runtime_state(&self) -> RuntimeState {
        self.state().clone()
    }

    fn state(&self) -> MutexGuard<'_, RuntimeState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
