//! # Runner Error Types

use strider_core::PoolError;
use strider_procedural::LevelError;
use thiserror::Error;

/// Errors that stop the level runner.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunnerError {
    /// Level configuration or generation failed.
    #[error(transparent)]
    Level(#[from] LevelError),

    /// A pool could not be registered.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Result type for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;
