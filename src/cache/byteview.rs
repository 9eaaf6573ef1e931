//! Byte View Module
//!
//! Immutable byte container stored as the cached value.

use std::fmt;

use bytes::Bytes;

use crate::cache::Value;

// == Value View ==
/// An immutable view over cached bytes.
///
/// The bytes are copied in at construction and every read hands out either a
/// fresh copy or a string decoded from them, so no caller can mutate data
/// shared with the cache or with other readers. Cloning a view shares the
/// same read-only buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ValueView {
    bytes: Bytes,
}

impl ValueView {
    // == Constructor ==
    /// Creates a view holding a private copy of `data`.
    pub fn new(data: impl AsRef<[u8]>) -> Self {
        Self {
            bytes: Bytes::copy_from_slice(data.as_ref()),
        }
    }

    /// Returns the length of the view in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    // == Byte Slice ==
    /// Returns a copy of the data. Mutating it never affects the view.
    pub fn byte_slice(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }
}

/// Decodes the bytes as UTF-8, replacing invalid sequences with U+FFFD.
impl fmt::Display for ValueView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bytes))
    }
}

impl Value for ValueView {
    fn len(&self) -> usize {
        self.bytes.len()
    }
}

impl From<&[u8]> for ValueView {
    fn from(data: &[u8]) -> Self {
        Self::new(data)
    }
}

impl From<&str> for ValueView {
    fn from(data: &str) -> Self {
        Self::new(data)
    }
}
