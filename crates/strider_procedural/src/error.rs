//! # Level Error Types
//!
//! Everything here is fatal at initialization. Runtime spawn misses are
//! logged and skipped, never surfaced as errors.

use thiserror::Error;

/// Errors that can occur while setting up or driving level generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LevelError {
    /// Two arrays that must agree on a dimension do not.
    #[error("dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// What disagreed (e.g. "lane offsets").
        what: &'static str,
        /// The dimension the grid requires.
        expected: usize,
        /// The dimension that was supplied.
        actual: usize,
    },

    /// A probability outside `[0, 1]`.
    #[error("probability {name} must be within [0, 1], got {value}")]
    InvalidProbability {
        /// Config key of the probability.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Any other invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file is not valid TOML for [`crate::LevelConfig`].
    #[error("failed to parse level config: {0}")]
    ConfigParse(String),

    /// The configuration file could not be read.
    #[error("failed to read level config {path}: {reason}")]
    ConfigIo {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },

    /// The previous ground plane went back to the pool while it was still
    /// needed as the anchor for the next one.
    #[error("previous ground plane is no longer active")]
    PlaneLost,
}

/// Result type for level operations.
pub type LevelResult<T> = Result<T, LevelError>;
