//! Fixed-capacity, insertion-ordered entry cache.

use std::sync::{Mutex, MutexGuard};

use indexmap::IndexMap;

use crate::entry::Entry;

/// Insertion-ordered map of entry id to [`Entry`], evicting the oldest
/// insertion once `capacity` is exceeded. Reads do not affect order.
#[derive(Debug)]
pub struct BoundedCache {
    capacity: usize,
    entries: Mutex<IndexMap<String, Entry>>,
}

impl BoundedCache {
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be at least 1");
        Self {
            capacity,
            entries: Mutex::new(IndexMap::with_capacity(capacity + 1)),
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert or replace `entry`, moving it to the newest position, then evict
    /// the oldest entry if the cache grew past capacity.
    pub fn store(&self, entry: Entry) -> Option<Entry> {
        let mut entries = self.lock();
        entries.shift_remove(&entry.id);
        entries.insert(entry.id.clone(), entry);
        if entries.len() > self.capacity {
            entries.shift_remove_index(0).map(|(_, evicted)| evicted)
        } else {
            None
        }
    }

    /// Owned copy of all entries in insertion order.
    pub fn snapshot(&self) -> Vec<Entry> {
        self.lock().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // Every critical section leaves the map consistent; poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, IndexMap<String, Entry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
