//! # STRIDER Procedural Generation
//!
//! Deterministic, always-passable level segments for an endless runner.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed always produces the same level
//! 2. **Passable**: Every row of every plane has at least one open lane
//! 3. **Seamless**: Row 0 of a plane respects the last row of the one before
//! 4. **Allocation-free loop**: One grid buffer, reused for every plane
//!
//! ## Core Components
//!
//! - `SegmentGrid` / `BoundaryMemory`: the plan of one plane and its seam
//! - `GridPopulator`: platforms, ramps and obstacles
//! - `ensure_passable`: the repair pass
//! - `CollectiblePlanner`: coin streaks on ramps and obstacles
//! - `PlaneMaterializer`: spawns the plan through a pool provider
//! - `PlaneSequencer`: runs the whole pipeline, one plane per request
//!
//! ## Example
//!
//! ```rust,ignore
//! use strider_procedural::{LevelConfig, LevelSeed, PlaneSequencer};
//!
//! let config = LevelConfig::from_toml_file(Path::new("data/level.toml"))?;
//! let mut sequencer = PlaneSequencer::with_config_offsets(config, pool, LevelSeed::new(12345))?;
//!
//! // Called by the frame loop whenever a ground plane is free
//! if let Some(report) = sequencer.generate_next()? {
//!     println!("plane {} ready", report.index);
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod collectibles;
pub mod config;
pub mod error;
pub mod grid;
pub mod materialize;
pub mod populate;
pub mod repair;
pub mod seed;
pub mod sequencer;

pub use collectibles::{CollectiblePlan, CollectiblePlanner, CollectibleStreak};
pub use config::{
    CollectibleConfig, LayoutConfig, LevelConfig, ObstacleConfig, PrefabNames, Probabilities,
};
pub use error::{LevelError, LevelResult};
pub use grid::{BoundaryMemory, CellType, SegmentGrid};
pub use materialize::{MaterializeReport, PlaneAnchor, PlaneMaterializer};
pub use populate::GridPopulator;
pub use repair::{ensure_passable, RepairReport};
pub use seed::{LevelRng, LevelSeed};
pub use sequencer::{PlaneReport, PlaneSequencer, SequencerState};
