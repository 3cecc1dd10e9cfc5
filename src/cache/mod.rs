//! Cache Module
//!
//! Provides an in-memory LRU cache bounded by value bytes and entry count.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::{NodeId, RecencyList};
pub use shared::LruCache;
pub use stats::CacheStats;
pub use store::{CacheStore, SetOutcome};
