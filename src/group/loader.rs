//! Loader Module
//!
//! The source-of-truth hook a group calls on a cache miss.

/// Fetches the bytes for a key that is not cached.
///
/// Implementations are called concurrently from every thread that misses,
/// without any cache lock held. Errors are returned to the caller of
/// [`Group::get`](crate::group::Group::get) unchanged; retries, if any, are
/// the loader's business.
pub trait Loader: Send + Sync {
    fn load(&self, key: &str) -> anyhow::Result<Vec<u8>>;
}

/// Any thread-safe closure with the right signature is a loader.
impl<F> Loader for F
where
    F: Fn(&str) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    fn load(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        self(key)
    }
}
