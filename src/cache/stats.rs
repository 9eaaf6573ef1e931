//! Cache Statistics Module
//!
//! Tracks per-group performance metrics including hits, misses, loads and evictions.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Group Stats ==
/// Point-in-time snapshot of a group's metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that fell through to the loader
    pub misses: u64,
    /// Successful loader calls
    pub loads: u64,
    /// Failed loader calls
    pub load_errors: u64,
    /// Entries evicted due to LRU policy
    pub evictions: u64,
    /// Current number of cached entries
    pub entries: usize,
    /// Bytes accounted to cached entries
    pub used_bytes: usize,
}

impl GroupStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Recorder ==
/// Lock-free counters updated on the lookup path.
#[derive(Debug, Default)]
pub struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
    loads: AtomicU64,
    load_errors: AtomicU64,
}

impl StatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_error(&self) {
        self.load_errors.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Combines the counters with cache-side figures into a [`GroupStats`].
    pub fn snapshot(&self, evictions: u64, entries: usize, used_bytes: usize) -> GroupStats {
        GroupStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
            load_errors: self.load_errors.load(Ordering::Relaxed),
            evictions,
            entries,
            used_bytes,
        }
    }
}
