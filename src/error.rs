//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use std::fmt;

use thiserror::Error;

// == Capacity Bound ==
/// Identifies which configured capacity bound was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityBound {
    /// The byte budget (`max_bytes`)
    MaxBytes,
    /// The item budget (`max_items`)
    MaxItems,
}

impl fmt::Display for CapacityBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityBound::MaxBytes => f.write_str("max bytes"),
            CapacityBound::MaxItems => f.write_str("max items"),
        }
    }
}

// == Cache Error Enum ==
/// Unified error type for the cache engine.
///
/// Misses and oversized writes are ordinary outcomes and never show up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A capacity bound was zero at construction time
    #[error("invalid {0}, must be greater than 0")]
    InvalidCapacity(CapacityBound),
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;
