//! # STRIDER Core
//!
//! Pre-allocated object pools for level content.
//!
//! ## Architecture Rules
//!
//! 1. **Everything is pooled** - ground planes, platforms, obstacles and coins
//!    are instantiated once, when their pool is registered
//! 2. **Misses are gaps, not crashes** - an unknown or exhausted pool logs a
//!    warning and the spawn returns `None`
//! 3. **Parenting is bookkeeping** - content is attached to its ground plane
//!    so the plane can carry and recycle it
//!
//! ## Example
//!
//! ```rust,ignore
//! use strider_core::{ObjectPool, ObjectPoolProvider, PivotOffsets, PlacementService};
//!
//! let mut pool = ObjectPool::new(Vec3::new(0.0, -100.0, 0.0));
//! pool.register("Platform", 32)?;
//!
//! let offsets = PivotOffsets::new().with_offset("Platform", Vec3::new(0.0, 0.5, 0.0));
//! if let Some(platform) = pool.spawn("Platform", position, Quaternion::IDENTITY) {
//!     offsets.apply_offset(&mut pool, "Platform", platform, position);
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod placement;
pub mod pool;

pub use error::{PoolError, PoolResult};
pub use placement::{PivotOffsets, PlacementService};
pub use pool::{InstanceHandle, ObjectPool, ObjectPoolProvider};
