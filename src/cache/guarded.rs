//! Guarded Cache Module
//!
//! Thread-safe wrapper around a single [`LruStore`] of [`ValueView`]s.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{LruStore, ValueView};

// == Guarded Cache ==
/// An [`LruStore`] behind one exclusive lock.
///
/// `get` takes the same lock as `add` because a hit reorders the recency
/// list. The store is built on the first `add`; until then every `get`
/// misses without allocating anything.
#[derive(Debug)]
pub struct GuardedCache {
    capacity_bytes: usize,
    store: Mutex<Option<LruStore<ValueView>>>,
    evictions: Arc<AtomicU64>,
}

impl GuardedCache {
    // == Constructor ==
    /// Creates a cache that will hold at most `capacity_bytes` (0 = unbounded).
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            capacity_bytes,
            store: Mutex::new(None),
            evictions: Arc::new(AtomicU64::new(0)),
        }
    }

    // == Add ==
    /// Stores `value` under `key`, possibly evicting older entries.
    pub fn add(&self, key: &str, value: ValueView) {
        let mut guard = self.store.lock();
        let store = guard.get_or_insert_with(|| {
            let evictions = Arc::clone(&self.evictions);
            LruStore::with_on_evicted(self.capacity_bytes, move |_: &str, _: &ValueView| {
                evictions.fetch_add(1, Ordering::Relaxed);
            })
        });
        store.add(key, value);
    }

    // == Get ==
    /// Returns the cached view for `key`, promoting it on a hit.
    pub fn get(&self, key: &str) -> Option<ValueView> {
        let mut guard = self.store.lock();
        guard.as_mut()?.get(key).cloned()
    }

    // == Accessors ==
    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.store.lock().as_ref().map_or(0, LruStore::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn used_bytes(&self) -> usize {
        self.store.lock().as_ref().map_or(0, LruStore::used_bytes)
    }

    /// Entry count and used bytes, read under one lock so they agree.
    pub fn occupancy(&self) -> (usize, usize) {
        self.store
            .lock()
            .as_ref()
            .map_or((0, 0), |store| (store.len(), store.used_bytes()))
    }

    pub fn capacity_bytes(&self) -> usize {
        self.capacity_bytes
    }

    /// Total entries evicted since the cache was created.
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Returns true once the first `add` has built the underlying store.
    pub fn is_initialized(&self) -> bool {
        self.store.lock().is_some()
    }
}
