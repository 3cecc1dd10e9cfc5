//! Configuration Module
//!
//! Loads cache capacities for a host process from environment variables.
//! The cache itself never reads the environment; this is a convenience for
//! hosts that want to size it that way.

use std::env;

use crate::cache::LruCache;
use crate::error::Result;

/// Environment variable holding the byte budget.
pub const MAX_BYTES_VAR: &str = "CACHE_MAX_BYTES";
/// Environment variable holding the item budget.
pub const MAX_ITEMS_VAR: &str = "CACHE_MAX_ITEMS";

const DEFAULT_MAX_BYTES: usize = 64 * 1024 * 1024; // 64 MiB
const DEFAULT_MAX_ITEMS: usize = 10_000;

/// Cache sizing parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Ceiling on the sum of stored value lengths
    pub max_bytes: usize,
    /// Ceiling on the number of entries
    pub max_items: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_BYTES` - Byte budget (default: 64 MiB)
    /// - `CACHE_MAX_ITEMS` - Item budget (default: 10000)
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse = |name: &str, default: usize| {
            lookup(name)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            max_bytes: parse(MAX_BYTES_VAR, DEFAULT_MAX_BYTES),
            max_items: parse(MAX_ITEMS_VAR, DEFAULT_MAX_ITEMS),
        }
    }

    /// Builds an empty cache with these capacities.
    ///
    /// An explicit zero in either field surfaces as `InvalidCapacity`.
    pub fn build(&self) -> Result<LruCache> {
        LruCache::new(self.max_bytes, self.max_items)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}
