//! Shared Cache Module
//!
//! Thread-safe handle around [`CacheStore`].
//!
//! Reads promote entries, so every operation mutates shared state. One
//! exclusive lock covers the index, the recency list and both counters.

use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore, SetOutcome};
use crate::error::Result;

// == LRU Cache ==
/// Bounded LRU cache safe to share across threads (wrap it in an `Arc`).
///
/// # Example
/// ```
/// use byte_lru::LruCache;
///
/// let cache = LruCache::new(1024, 2).unwrap();
/// cache.set("a", b"1".to_vec());
/// cache.set("b", b"2".to_vec());
/// cache.get("a");
/// cache.set("c", b"3".to_vec()); // evicts "b"
///
/// assert_eq!(cache.get("a"), Some(b"1".to_vec()));
/// assert_eq!(cache.get("b"), None);
/// ```
#[derive(Debug)]
pub struct LruCache {
    inner: Mutex<CacheStore>,
}

impl LruCache {
    /// Creates an empty cache.
    ///
    /// # Errors
    /// Fails with `CacheError::InvalidCapacity` if either bound is zero.
    pub fn new(max_bytes: usize, max_items: usize) -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(CacheStore::new(max_bytes, max_items)?),
        })
    }

    /// Returns a copy of the value under `key` and marks it most recently used.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.lock().get(key)
    }

    /// Stores `value` under `key`. See [`CacheStore::set`].
    pub fn set(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> SetOutcome {
        let (key, value) = (key.into(), value.into());
        self.inner.lock().set(key, value)
    }

    /// Removes `key` if present.
    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().delete(key)
    }

    /// Checks for `key` without changing its recency.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Snapshot of live keys, most recently used first.
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().keys().map(str::to_owned).collect()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn size_bytes(&self) -> usize {
        self.inner.lock().size_bytes()
    }

    pub fn max_bytes(&self) -> usize {
        self.inner.lock().max_bytes()
    }

    pub fn max_items(&self) -> usize {
        self.inner.lock().max_items()
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        self.inner.lock().assert_consistent();
    }
}
