//! Per-engine entropy tags attached to entries for presentation variety.
//!
//! Tags are not identities and carry no security meaning.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

/// Upper bound on the length of a produced tag.
pub const TAG_LEN: usize = 32;

#[derive(Debug)]
pub struct EntropySource {
    seed: String,
    calls: AtomicUsize,
}

impl EntropySource {
    /// Draw a fresh seed from the thread RNG.
    pub fn new() -> Self {
        Self::from_seed(rand::rng().random())
    }

    /// Build a source from a fixed seed (deterministic tags).
    pub fn from_seed(seed: [u8; 16]) -> Self {
        Self {
            seed: hex::encode(seed),
            calls: AtomicUsize::new(0),
        }
    }

    /// Produce the next tag: the seed rotated left by a pivot that starts at a
    /// seed-derived offset and moves by one on every call.
    pub fn rotate(&self) -> String {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        let len = self.seed.len();
        let start = usize::from_str_radix(&self.seed[..2], 16).unwrap_or(0);
        let pivot = start.wrapping_add(n) % len;
        let mut tag = String::with_capacity(len);
        tag.push_str(&self.seed[pivot..]);
        tag.push_str(&self.seed[..pivot]);
        tag.truncate(TAG_LEN);
        tag
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}
