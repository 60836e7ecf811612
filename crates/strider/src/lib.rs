//! # STRIDER
//!
//! The endless runner level, tied together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          LEVEL RUNNER                           │
//! │   scroll planes -> recycle planes -> poll ground plane pool     │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │ generate_next()
//! ┌───────────────────────────────▼─────────────────────────────────┐
//! │                         PLANE SEQUENCER                         │
//! │  populate -> repair -> obstacles -> collectibles -> materialize │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │ spawn / release / set_parent
//! ┌───────────────────────────────▼─────────────────────────────────┐
//! │                           OBJECT POOL                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `runner`: Plane scrolling, recycling and readiness polling
//! - `error`: Runner errors

pub mod error;
pub mod runner;

// Re-export the layers
pub use strider_core as core;
pub use strider_procedural as procedural;

pub use error::{RunnerError, RunnerResult};
pub use runner::{build_pool, LevelRunner, PoolCapacities, RunnerConfig, RunnerStats};
