//! # STRIDER Shared
//!
//! Common types used by the level generator and the driving loop.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on an engine, a renderer or a physics crate.
//! It holds plain math types and the default layout constants only.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use constants::{LANE_COUNT, LANE_OFFSETS, PLANE_LENGTH, ROW_COUNT};
pub use math::{Quaternion, Transform, Vec3};
