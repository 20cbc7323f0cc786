//! Error types for collatzcache

use std::fmt;

/// Result type alias for collatzcache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache and step-count operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Key has no entry in the store
    NotFound(u64),

    /// Key lies outside the addressable range `0..bound`
    KeyOutOfRange {
        /// Offending key
        key: u64,
        /// Exclusive upper bound of the key space
        bound: u64,
    },

    /// Cache capacity must be at least 1
    CapacityInvalid(usize),

    /// Key space bound must be at least 1
    KeyBoundInvalid(u64),

    /// Step count requested for a non-positive input
    InvalidInput(u64),

    /// Trajectory left the `u64` range
    Overflow(u64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(key) => write!(f, "Key not found: {}", key),
            Error::KeyOutOfRange { key, bound } => {
                write!(f, "Key out of range: {} (bound {})", key, bound)
            }
            Error::CapacityInvalid(cap) => {
                write!(f, "Invalid capacity: {} (must be greater than 0)", cap)
            }
            Error::KeyBoundInvalid(bound) => {
                write!(f, "Invalid key bound: {} (must be greater than 0)", bound)
            }
            Error::InvalidInput(n) => write!(f, "Invalid input: {} (must be at least 1)", n),
            Error::Overflow(n) => write!(f, "Trajectory overflowed u64 after {}", n),
        }
    }
}

impl std::error::Error for Error {}
