//! # Layout & Prefab Constants
//!
//! Default world layout and pool names for STRIDER levels.
//!
//! These are the baked-in defaults. Every value can be overridden from
//! `data/level.toml`; gameplay feel depends on them, so change with care.

// =============================================================================
// GRID LAYOUT
// =============================================================================

/// Number of parallel lanes the player can occupy.
pub const LANE_COUNT: usize = 3;

/// Number of forward slices per ground plane.
pub const ROW_COUNT: usize = 10;

/// Length of one ground plane along Z (world units).
pub const PLANE_LENGTH: f32 = 70.0;

/// World X offset of each lane (left, middle, right).
pub const LANE_OFFSETS: [f32; LANE_COUNT] = [-2.3, 0.0, 2.3];

/// Extra Z shift applied to grid segments, relative to the plane's back edge.
pub const SEGMENT_Z_BIAS: f32 = -5.0;

/// Fraction of a row at which a segment is centered.
pub const SEGMENT_ROW_FRACTION: f32 = 0.5;

// =============================================================================
// PROBABILITIES
// =============================================================================

/// Chance a cell becomes a platform.
pub const PLATFORM_CHANCE: f64 = 0.5;

/// Chance a cell becomes a ramp (when a platform was not rolled).
pub const RAMP_CHANCE: f64 = 0.3;

/// Chance a ramp continues into a platform on the next row.
pub const RAMP_CONTINUATION_CHANCE: f64 = 0.7;

/// Chance an eligible empty cell receives an obstacle.
pub const OBSTACLE_CHANCE: f64 = 0.5;

/// Chance a candidate cell seeds a collectible streak.
pub const COLLECTIBLE_CHANCE: f64 = 0.7;

// =============================================================================
// OBSTACLES & COLLECTIBLES
// =============================================================================

/// Rows per obstacle group (at most one obstacle per group).
pub const OBSTACLE_GROUP_ROWS: usize = 3;

/// Drawn-total cap for collectibles on one plane.
pub const COLLECTIBLE_CAP: u32 = 15;

/// Smallest drawn streak length (inclusive).
pub const STREAK_MIN: u32 = 2;

/// Largest drawn streak length (exclusive).
pub const STREAK_MAX: u32 = 8;

/// Forward spacing between collectibles in a streak.
pub const STREAK_SPACING: f32 = 0.8;

/// Height of collectibles riding on a ramp or platform.
pub const ELEVATED_HEIGHT: f32 = 2.0;

/// Fraction of a row at which a streak starts.
pub const COLLECTIBLE_ROW_FRACTION: f32 = 0.3;

// =============================================================================
// POOL NAMES
// =============================================================================

/// Ground plane pool.
pub const GROUND_PLANE: &str = "GroundPlane";

/// Plain platform pool.
pub const PLATFORM: &str = "Platform";

/// Platform-with-ramp pool.
pub const PLATFORM_WITH_RAMP: &str = "PlatformWithRamp";

/// Obstacle variant pools.
pub const OBSTACLES: [&str; 3] = ["ObstacleJump", "ObstacleSlide", "ObstacleWall"];

/// Collectible coin pool.
pub const COIN: &str = "Coin";
