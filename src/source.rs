//! Static Source Module
//!
//! In-memory stand-in for a slow backing database, usable as a group loader.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use parking_lot::Mutex;
use tracing::info;

use crate::group::Loader;

// == Static Source ==
/// Key/value backing data that counts how often each key is looked up.
///
/// Clones share the same data and counters, so a test can keep one handle
/// while a group owns another.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    data: Arc<HashMap<String, String>>,
    lookups: Arc<Mutex<HashMap<String, usize>>>,
}

impl StaticSource {
    // == Constructors ==
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            data: Arc::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            lookups: Arc::default(),
        }
    }

    /// Small built-in data set used when no source file is configured.
    pub fn demo() -> Self {
        Self::new([("Alice", "160"), ("Nicole", "170"), ("Kate", "165")])
    }

    /// Loads a JSON object of string values, e.g. `{"Alice": "160"}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read source file {}", path.display()))?;
        let data: HashMap<String, String> = serde_json::from_str(&raw)
            .with_context(|| format!("invalid source file {}", path.display()))?;
        Ok(Self::new(data))
    }

    // == Accessors ==
    /// How many times `key` has been looked up, found or not.
    pub fn lookups(&self, key: &str) -> usize {
        self.lookups.lock().get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Loader for StaticSource {
    fn load(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        info!("[SlowDB] search key {}", key);
        *self.lookups.lock().entry(key.to_string()).or_insert(0) += 1;

        self.data
            .get(key)
            .map(|value| value.as_bytes().to_vec())
            .ok_or_else(|| anyhow!("{} not exist", key))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_demo_source() {
        let source = StaticSource::demo();
        assert_eq!(source.len(), 3);
        assert_eq!(source.load("Kate").unwrap(), b"165".to_vec());
    }

    #[test]
    fn test_unknown_key_errors() {
        let source = StaticSource::demo();
        let err = source.load("Tom").unwrap_err();
        assert_eq!(err.to_string(), "Tom not exist");
    }

    #[test]
    fn test_lookups_shared_between_clones() {
        let source = StaticSource::demo();
        let handle = source.clone();

        source.load("Alice").unwrap();
        source.load("Alice").unwrap();
        let _ = source.load("Tom");

        assert_eq!(handle.lookups("Alice"), 2);
        assert_eq!(handle.lookups("Tom"), 1);
        assert_eq!(handle.lookups("Kate"), 0);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"k1": "v1", "k2": "v2"}"#).unwrap();

        let source = StaticSource::from_json_file(file.path()).unwrap();

        assert_eq!(source.len(), 2);
        assert_eq!(source.load("k2").unwrap(), b"v2".to_vec());
    }

    #[test]
    fn test_from_invalid_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2, 3]").unwrap();

        let err = StaticSource::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid source file"));
    }

    #[test]
    fn test_from_missing_json_file() {
        let result = StaticSource::from_json_file("/definitely/not/here.json");
        assert!(result.is_err());
    }
}
