use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// One indexed wallpaper. Entries are built during a scan and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Opaque unique id, generated at creation; never derived from content.
    pub id: String,
    pub path: PathBuf,
    /// Content fingerprint of the file bytes at ingest time.
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
    /// Always starts with the enclosing directory name.
    pub tags: Vec<String>,
    pub entropy_tag: Option<String>,
}
