//! Mini Groupcache - An in-process byte-bounded LRU cache
//!
//! Named groups check their cache first and fall back to a pluggable loader
//! on a miss, storing what it returns.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod group;
pub mod models;
pub mod source;

pub use api::AppState;
pub use cache::{GroupStats, ValueView};
pub use config::Config;
pub use error::{CacheError, Result};
pub use group::{Group, GroupRegistry, Loader};
pub use source::StaticSource;
