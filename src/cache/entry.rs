//! Cache Entry Module
//!
//! Defines the key/value pair held in each recency list slot.

// == Cache Entry ==
/// Represents a single cache entry.
///
/// The key is fixed once the entry exists; the value is replaced in place
/// when the same key is written again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The key this entry is indexed under
    key: String,
    /// The stored bytes
    pub value: Vec<u8>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry.
    pub fn new(key: String, value: Vec<u8>) -> Self {
        Self { key, value }
    }

    // == Key ==
    pub fn key(&self) -> &str {
        &self.key
    }

    // == Size ==
    /// Returns the number of bytes this entry counts against the byte budget.
    ///
    /// Only the value is accounted; keys are free.
    pub fn size(&self) -> usize {
        self.value.len()
    }

    // == Replace Value ==
    /// Swaps in a new value and returns the previous one.
    pub fn replace_value(&mut self, value: Vec<u8>) -> Vec<u8> {
        std::mem::replace(&mut self.value, value)
    }
}
