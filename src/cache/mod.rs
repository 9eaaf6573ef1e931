//! Cache Module
//!
//! Provides the byte-bounded LRU store, its thread-safe wrapper and the
//! immutable value type kept in it.

mod byteview;
mod guarded;
mod lru;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use byteview::ValueView;
pub use guarded::GuardedCache;
pub use lru::{LruStore, OnEvicted, Value};
pub use stats::{GroupStats, StatsRecorder};
