//! Group Module
//!
//! A named cache-aside namespace: cache first, loader on miss, then populate.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{GroupStats, GuardedCache, StatsRecorder, ValueView};
use crate::error::{CacheError, Result};
use crate::group::Loader;

// == Group ==
/// A named cache bound to a [`Loader`].
///
/// Groups are created through [`GroupRegistry::new_group`](crate::group::GroupRegistry::new_group).
/// Concurrent misses on the same key are not coalesced: each caller runs
/// the loader on its own and the last write wins.
pub struct Group {
    name: String,
    loader: Arc<dyn Loader>,
    main_cache: GuardedCache,
    stats: StatsRecorder,
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("main_cache", &self.main_cache)
            .finish_non_exhaustive()
    }
}

impl Group {
    pub(crate) fn new(name: String, capacity_bytes: usize, loader: Arc<dyn Loader>) -> Self {
        Self {
            name,
            loader,
            main_cache: GuardedCache::new(capacity_bytes),
            stats: StatsRecorder::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity_bytes(&self) -> usize {
        self.main_cache.capacity_bytes()
    }

    // == Get ==
    /// Returns the value for `key`, loading and caching it on a miss.
    ///
    /// # Errors
    /// - [`CacheError::InvalidKey`] for an empty key; the cache is not touched.
    /// - [`CacheError::Load`] carrying the loader's error verbatim; nothing is cached.
    pub fn get(&self, key: &str) -> Result<ValueView> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey);
        }

        if let Some(value) = self.main_cache.get(key) {
            self.stats.record_hit();
            debug!(group = %self.name, key, "cache hit");
            return Ok(value);
        }

        self.stats.record_miss();
        debug!(group = %self.name, key, "cache miss");
        self.load(key)
    }

    fn load(&self, key: &str) -> Result<ValueView> {
        self.get_locally(key)
    }

    /// Runs the loader outside any lock and caches a copy of what it returns.
    fn get_locally(&self, key: &str) -> Result<ValueView> {
        let bytes = self.loader.load(key).map_err(|err| {
            self.stats.record_load_error();
            warn!(group = %self.name, key, error = %err, "loader failed");
            CacheError::Load(err)
        })?;

        self.stats.record_load();
        let value = ValueView::new(&bytes);
        debug!(group = %self.name, key, bytes = value.len(), "loaded from source");
        self.populate_cache(key, value.clone());
        Ok(value)
    }

    fn populate_cache(&self, key: &str, value: ValueView) {
        self.main_cache.add(key, value);
    }

    // == Introspection ==
    /// Number of entries currently cached.
    pub fn cached_entries(&self) -> usize {
        self.main_cache.len()
    }

    pub fn stats(&self) -> GroupStats {
        let (entries, used_bytes) = self.main_cache.occupancy();
        self.stats.snapshot(self.main_cache.evictions(), entries, used_bytes)
    }
}
