//! Byte LRU - A bounded in-process cache
//!
//! Maps string keys to byte values and evicts the least recently used entry
//! whenever the byte budget or the item budget would be exceeded.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStats, LruCache, SetOutcome};
pub use config::Config;
pub use error::{CacheError, CapacityBound, Result};
