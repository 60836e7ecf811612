//! # Pool Error Types
//!
//! Errors raised while setting pools up. Spawn misses at runtime are not
//! errors; see [`crate::ObjectPoolProvider`].

use thiserror::Error;

/// Errors that can occur while registering pools.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A pool with this name is already registered.
    #[error("pool already registered: {0}")]
    DuplicatePool(String),

    /// A pool was registered with no instances.
    #[error("pool {0} must hold at least one instance")]
    ZeroCapacity(String),
}

/// Result type for pool setup.
pub type PoolResult<T> = Result<T, PoolError>;
