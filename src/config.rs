//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the group served by the binary
    pub group_name: String,
    /// Byte capacity of that group, 0 = unbounded
    pub cache_bytes: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Optional JSON file with the backing key/value data
    pub source_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `GROUP_NAME` - Served group name (default: scores)
    /// - `CACHE_BYTES` - Group capacity in bytes (default: 2048)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SOURCE_FILE` - JSON backing data (default: built-in demo data)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            group_name: env::var("GROUP_NAME")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.group_name),
            cache_bytes: env::var("CACHE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_bytes),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            source_file: env::var("SOURCE_FILE")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            group_name: "scores".to_string(),
            cache_bytes: 2 << 10,
            server_port: 3000,
            source_file: None,
        }
    }
}
