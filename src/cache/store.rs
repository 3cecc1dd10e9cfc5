//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with an arena-backed recency
//! list and byte/item accounting.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, NodeId, RecencyList};
use crate::error::{CacheError, CapacityBound, Result};

// == Set Outcome ==
/// What a call to `set` did with the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The key was absent and a new entry was created
    Inserted,
    /// The key was present and its value was replaced
    Updated,
    /// The value is at least `max_bytes` long and was dropped
    Rejected,
}

impl SetOutcome {
    /// Returns true if the value landed in the cache.
    pub fn is_stored(self) -> bool {
        !matches!(self, SetOutcome::Rejected)
    }
}

// == Cache Store ==
/// Unsynchronized LRU engine bounded by total value bytes and entry count.
///
/// The index and the recency list always describe the same set of keys, and
/// `current_bytes` always equals the sum of the stored value lengths. After
/// every mutating call `current_bytes <= max_bytes` and `len() <= max_items`.
#[derive(Debug)]
pub struct CacheStore {
    /// Key to recency list slot
    index: HashMap<String, NodeId>,
    /// Entries ordered from most to least recently used
    order: RecencyList<CacheEntry>,
    /// Sum of value lengths over all live entries
    current_bytes: usize,
    max_bytes: usize,
    max_items: usize,
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `max_bytes` - Ceiling on the sum of stored value lengths
    /// * `max_items` - Ceiling on the number of entries
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` naming the first bound that is zero.
    pub fn new(max_bytes: usize, max_items: usize) -> Result<Self> {
        if max_bytes == 0 {
            return Err(CacheError::InvalidCapacity(CapacityBound::MaxBytes));
        }
        if max_items == 0 {
            return Err(CacheError::InvalidCapacity(CapacityBound::MaxItems));
        }

        debug!(max_bytes, max_items, "cache store created");

        Ok(Self {
            index: HashMap::new(),
            order: RecencyList::new(),
            current_bytes: 0,
            max_bytes,
            max_items,
            stats: CacheStats::new(),
        })
    }

    // == Get ==
    /// Retrieves a copy of the value stored under `key`.
    ///
    /// A hit promotes the entry to most recently used.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        let Some(&id) = self.index.get(key) else {
            trace!(key, "cache miss");
            self.stats.record_miss();
            return None;
        };

        self.order.move_to_front(id);
        let value = self.order.get(id).map(|entry| entry.value.clone());
        if value.is_some() {
            trace!(key, "cache hit");
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        value
    }

    // == Set ==
    /// Stores `value` under `key`, evicting least recently used entries
    /// until both capacity bounds hold again.
    ///
    /// A value whose length is at least `max_bytes` is never admitted, on
    /// either the insert or the update path. An existing entry under the same
    /// key is left untouched in that case.
    pub fn set(&mut self, key: String, value: Vec<u8>) -> SetOutcome {
        if value.len() >= self.max_bytes {
            debug!(
                key = %key,
                len = value.len(),
                max_bytes = self.max_bytes,
                "rejecting value that cannot fit"
            );
            self.stats.record_rejection();
            return SetOutcome::Rejected;
        }

        let existing = self.index.get(&key).copied();
        let outcome = match existing.and_then(|id| self.order.get_mut(id).map(|e| (id, e))) {
            Some((id, entry)) => {
                let added = value.len();
                let previous = entry.replace_value(value);
                self.current_bytes -= previous.len();
                self.current_bytes += added;
                self.order.move_to_front(id);
                SetOutcome::Updated
            }
            None => {
                self.current_bytes += value.len();
                let id = self.order.push_front(CacheEntry::new(key.clone(), value));
                self.index.insert(key, id);
                SetOutcome::Inserted
            }
        };

        self.evict_to_fit();
        outcome
    }

    // == Delete ==
    /// Removes the entry stored under `key`.
    ///
    /// Returns true if an entry was removed; absent keys are a no-op.
    pub fn delete(&mut self, key: &str) -> bool {
        let Some(id) = self.index.remove(key) else {
            return false;
        };
        match self.order.remove(id) {
            Some(entry) => {
                self.current_bytes -= entry.size();
                true
            }
            None => false,
        }
    }

    // == Contains ==
    /// Checks whether `key` is live without touching its recency.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Clear ==
    /// Drops every entry. Cumulative statistics are kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
        self.current_bytes = 0;
    }

    // == Keys ==
    /// Walks live keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(CacheEntry::key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_occupancy(self.order.len(), self.current_bytes);
        stats
    }

    // == Size Accessors ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the sum of stored value lengths.
    pub fn size_bytes(&self) -> usize {
        self.current_bytes
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    // == Eviction ==
    fn evict_to_fit(&mut self) {
        while self.current_bytes > self.max_bytes || self.order.len() > self.max_items {
            // Counters and list disagree if this ever runs dry.
            let Some(entry) = self.order.pop_back() else {
                break;
            };
            self.index.remove(entry.key());
            self.current_bytes -= entry.size();
            self.stats.record_eviction();
            debug!(key = entry.key(), freed = entry.size(), "evicted least recently used entry");
        }
    }

    /// Panics if the index, the recency list and the counters disagree.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.index.len(), self.order.len(), "index/list length mismatch");
        let mut bytes = 0;
        for (key, &id) in &self.index {
            let entry = self.order.get(id).expect("index points at a vacant slot");
            assert_eq!(entry.key(), key, "index points at the wrong entry");
            bytes += entry.size();
        }
        assert_eq!(self.order.iter().count(), self.order.len());
        assert_eq!(bytes, self.current_bytes, "byte counter drifted");
        assert!(self.current_bytes <= self.max_bytes);
        assert!(self.order.len() <= self.max_items);
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn store(max_bytes: usize, max_items: usize) -> CacheStore {
        CacheStore::new(max_bytes, max_items).unwrap()
    }

    #[test]
    fn test_store_new() {
        let store = store(100, 10);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.size_bytes(), 0);
        assert_eq!(store.max_bytes(), 100);
        assert_eq!(store.max_items(), 10);
    }

    #[test]
    fn test_store_new_rejects_zero_bounds() {
        assert_eq!(
            CacheStore::new(0, 0).unwrap_err(),
            CacheError::InvalidCapacity(CapacityBound::MaxBytes)
        );
        assert_eq!(
            CacheStore::new(1, 0).unwrap_err(),
            CacheError::InvalidCapacity(CapacityBound::MaxItems)
        );
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = store(100, 10);

        let outcome = store.set("key1".to_string(), b"value1".to_vec());

        assert_eq!(outcome, SetOutcome::Inserted);
        assert_eq!(store.get("key1"), Some(b"value1".to_vec()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.size_bytes(), 6);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = store(100, 10);
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_delete() {
        let mut store = store(100, 10);

        store.set("key1".to_string(), b"value1".to_vec());
        assert!(store.delete("key1"));

        assert!(store.is_empty());
        assert_eq!(store.size_bytes(), 0);
        assert_eq!(store.get("key1"), None);
        store.assert_consistent();
    }

    #[test]
    fn test_store_delete_nonexistent() {
        let mut store = store(100, 10);
        store.set("key1".to_string(), b"v".to_vec());

        assert!(!store.delete("nonexistent"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.size_bytes(), 1);
        store.assert_consistent();
    }

    #[test]
    fn test_store_overwrite_adjusts_bytes() {
        let mut store = store(100, 10);

        store.set("key1".to_string(), b"value1".to_vec());
        let outcome = store.set("key1".to_string(), b"v2".to_vec());

        assert_eq!(outcome, SetOutcome::Updated);
        assert_eq!(store.get("key1"), Some(b"v2".to_vec()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.size_bytes(), 2);
        store.assert_consistent();
    }

    #[test]
    fn test_store_overwrite_promotes() {
        let mut store = store(100, 3);

        store.set("a".to_string(), b"1".to_vec());
        store.set("b".to_string(), b"2".to_vec());
        store.set("c".to_string(), b"3".to_vec());
        store.set("a".to_string(), b"4".to_vec());
        store.set("d".to_string(), b"5".to_vec());

        assert!(store.contains("a"));
        assert!(!store.contains("b"));
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["d", "a", "c"]);
    }

    #[test]
    fn test_store_growing_overwrite_evicts_others() {
        let mut store = store(10, 10);

        store.set("a".to_string(), b"aaa".to_vec());
        store.set("b".to_string(), b"bbb".to_vec());
        store.set("c".to_string(), b"ccc".to_vec());

        // c grows from 3 to 9 bytes: a and b must both go
        store.set("c".to_string(), b"ccccccccc".to_vec());

        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["c"]);
        assert_eq!(store.size_bytes(), 9);
        assert_eq!(store.stats().evictions, 2);
        store.assert_consistent();
    }

    #[test]
    fn test_store_rejects_value_at_byte_budget() {
        let mut store = store(10, 10);

        assert_eq!(store.set("big".to_string(), vec![0; 10]), SetOutcome::Rejected);
        assert_eq!(store.set("bigger".to_string(), vec![0; 30]), SetOutcome::Rejected);
        assert_eq!(store.set("fits".to_string(), vec![0; 9]), SetOutcome::Inserted);

        assert!(!store.contains("big"));
        assert!(!store.contains("bigger"));
        assert_eq!(store.stats().rejections, 2);
    }

    #[test]
    fn test_store_rejected_update_keeps_old_value() {
        let mut store = store(10, 10);

        store.set("k".to_string(), b"old".to_vec());
        store.set("other".to_string(), b"x".to_vec());
        let outcome = store.set("k".to_string(), vec![0; 64]);

        assert_eq!(outcome, SetOutcome::Rejected);
        assert!(!outcome.is_stored());
        assert_eq!(store.size_bytes(), 4);
        // not promoted by the rejected write
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["other", "k"]);
        assert_eq!(store.get("k"), Some(b"old".to_vec()));
    }

    #[test]
    fn test_store_lru_eviction_by_items() {
        let mut store = store(1000, 3);

        store.set("key1".to_string(), b"value1".to_vec());
        store.set("key2".to_string(), b"value2".to_vec());
        store.set("key3".to_string(), b"value3".to_vec());
        store.set("key4".to_string(), b"value4".to_vec());

        assert_eq!(store.len(), 3);
        assert_eq!(store.get("key1"), None);
        assert!(store.get("key2").is_some());
        assert!(store.get("key3").is_some());
        assert!(store.get("key4").is_some());
        store.assert_consistent();
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = store(1000, 3);

        store.set("key1".to_string(), b"value1".to_vec());
        store.set("key2".to_string(), b"value2".to_vec());
        store.set("key3".to_string(), b"value3".to_vec());

        store.get("key1");
        store.set("key4".to_string(), b"value4".to_vec());

        assert!(store.contains("key1"));
        assert!(!store.contains("key2"));
    }

    #[test]
    fn test_store_eviction_by_bytes_cascades() {
        let mut store = store(10, 100);

        for i in 1..=10 {
            store.set(i.to_string(), b"v".to_vec());
        }
        store.set("11".to_string(), b"v".to_vec());
        assert!(!store.contains("1"));

        // three bytes in: 2, 3 and 4 make room
        store.set("12".to_string(), b"vvv".to_vec());
        for key in ["2", "3", "4"] {
            assert!(!store.contains(key), "expecting key {key} to be evicted");
        }
        assert!(store.contains("5"));
        assert_eq!(store.size_bytes(), 10);
        store.assert_consistent();
    }

    #[test]
    fn test_store_contains_does_not_promote() {
        let mut store = store(100, 2);

        store.set("a".to_string(), b"1".to_vec());
        store.set("b".to_string(), b"2".to_vec());
        assert!(store.contains("a"));
        store.set("c".to_string(), b"3".to_vec());

        assert!(!store.contains("a"));
    }

    #[test]
    fn test_store_stats() {
        let mut store = store(100, 10);

        store.set("key1".to_string(), b"value1".to_vec());
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.total_bytes, 6);
    }

    #[test]
    fn test_store_clear_keeps_counters() {
        let mut store = store(100, 10);

        store.set("a".to_string(), b"1".to_vec());
        store.get("a");
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.size_bytes(), 0);
        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.total_entries, 0);
        store.assert_consistent();
    }
}
