//! # Level Configuration
//!
//! Layout constants, probabilities and pool names, loaded once at startup.
//!
//! Every field defaults to the baked-in constants from
//! [`strider_shared::constants`], so a config file only has to name what it
//! changes:
//!
//! ```toml
//! [probabilities]
//! platform = 0.4
//!
//! [collectibles]
//! cap = 20
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strider_core::PivotOffsets;
use strider_shared::constants;
use strider_shared::Vec3;

use crate::error::{LevelError, LevelResult};

/// World-space layout of one ground plane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Lanes across the plane.
    pub lane_count: usize,
    /// Rows along the plane.
    pub row_count: usize,
    /// Plane length along Z.
    pub plane_length: f32,
    /// X offset of each lane; must hold exactly `lane_count` values.
    pub lane_offsets: Vec<f32>,
    /// Z shift applied to grid segments.
    pub segment_z_bias: f32,
    /// Where inside its row a segment is centered (0 = row start).
    pub segment_row_fraction: f32,
    /// Position of the very first plane.
    pub first_plane_origin: Vec3,
}

impl LayoutConfig {
    /// Length of one row along Z.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn row_length(&self) -> f32 {
        self.plane_length / self.row_count as f32
    }

    /// Half the plane length (planes are centered on their origin).
    #[must_use]
    pub fn half_length(&self) -> f32 {
        self.plane_length * 0.5
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            lane_count: constants::LANE_COUNT,
            row_count: constants::ROW_COUNT,
            plane_length: constants::PLANE_LENGTH,
            lane_offsets: constants::LANE_OFFSETS.to_vec(),
            segment_z_bias: constants::SEGMENT_Z_BIAS,
            segment_row_fraction: constants::SEGMENT_ROW_FRACTION,
            first_plane_origin: Vec3::ZERO,
        }
    }
}

/// Independent coin-flip probabilities used while populating a grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Probabilities {
    /// A cell becomes a platform.
    pub platform: f64,
    /// A cell becomes a ramp (rolled only when the platform roll failed).
    pub ramp: f64,
    /// A ramp is followed by a platform in the next row.
    pub ramp_continuation: f64,
    /// An eligible cell receives an obstacle.
    pub obstacle: f64,
    /// A candidate cell seeds a collectible streak.
    pub collectible: f64,
}

impl Default for Probabilities {
    fn default() -> Self {
        Self {
            platform: constants::PLATFORM_CHANCE,
            ramp: constants::RAMP_CHANCE,
            ramp_continuation: constants::RAMP_CONTINUATION_CHANCE,
            obstacle: constants::OBSTACLE_CHANCE,
            collectible: constants::COLLECTIBLE_CHANCE,
        }
    }
}

impl Probabilities {
    fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("platform", self.platform),
            ("ramp", self.ramp),
            ("ramp_continuation", self.ramp_continuation),
            ("obstacle", self.obstacle),
            ("collectible", self.collectible),
        ]
    }
}

/// Obstacle pass settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObstacleConfig {
    /// Rows per group; at most one obstacle is placed per group.
    pub group_rows: usize,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            group_rows: constants::OBSTACLE_GROUP_ROWS,
        }
    }
}

/// Collectible streak settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectibleConfig {
    /// Scanning stops once the drawn total reaches this value.
    pub cap: u32,
    /// Smallest drawn streak length (inclusive).
    pub streak_min: u32,
    /// Largest drawn streak length (exclusive).
    pub streak_max: u32,
    /// Spawn `drawn + 1` items per streak instead of `drawn`.
    ///
    /// On by default to keep the shipped coin density; the drawn total that
    /// the cap counts does not include the extra item.
    pub inclusive_streak_bound: bool,
    /// Forward distance between items in a streak.
    pub spacing: f32,
    /// Height of items riding on a ramp or platform.
    pub elevated_height: f32,
    /// Where inside its row a streak starts (0 = row start).
    pub row_fraction: f32,
}

impl Default for CollectibleConfig {
    fn default() -> Self {
        Self {
            cap: constants::COLLECTIBLE_CAP,
            streak_min: constants::STREAK_MIN,
            streak_max: constants::STREAK_MAX,
            inclusive_streak_bound: true,
            spacing: constants::STREAK_SPACING,
            elevated_height: constants::ELEVATED_HEIGHT,
            row_fraction: constants::COLLECTIBLE_ROW_FRACTION,
        }
    }
}

/// Pool names for everything the level spawns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrefabNames {
    /// Ground plane pool.
    pub ground_plane: String,
    /// Platform pool.
    pub platform: String,
    /// Platform-with-ramp pool.
    pub platform_with_ramp: String,
    /// Obstacle variants; one is picked at random per obstacle cell.
    pub obstacles: Vec<String>,
    /// Collectible pool.
    pub collectible: String,
}

impl Default for PrefabNames {
    fn default() -> Self {
        Self {
            ground_plane: constants::GROUND_PLANE.to_owned(),
            platform: constants::PLATFORM.to_owned(),
            platform_with_ramp: constants::PLATFORM_WITH_RAMP.to_owned(),
            obstacles: constants::OBSTACLES.iter().map(|&s| s.to_owned()).collect(),
            collectible: constants::COIN.to_owned(),
        }
    }
}

/// Complete level generation configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelConfig {
    /// Plane and lane geometry.
    pub layout: LayoutConfig,
    /// Coin-flip probabilities.
    pub probabilities: Probabilities,
    /// Obstacle grouping.
    pub obstacles: ObstacleConfig,
    /// Collectible streaks.
    pub collectibles: CollectibleConfig,
    /// Pool names.
    pub prefabs: PrefabNames,
    /// Pivot offsets for prefabs whose pivot is not at their base.
    pub pivot_offsets: HashMap<String, Vec3>,
}

impl LevelConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::ConfigParse`] for malformed TOML and any
    /// [`LevelConfig::validate`] error.
    pub fn from_toml_str(source: &str) -> LevelResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| LevelError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::ConfigIo`] if the file cannot be read, otherwise
    /// as [`LevelConfig::from_toml_str`].
    pub fn from_toml_file(path: &Path) -> LevelResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| LevelError::ConfigIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks that the configuration describes a usable level.
    ///
    /// # Errors
    ///
    /// - [`LevelError::DimensionMismatch`] if the lane offsets disagree with
    ///   the lane count
    /// - [`LevelError::InvalidProbability`] for a probability outside `[0, 1]`
    /// - [`LevelError::InvalidConfig`] for empty grids, non-positive lengths,
    ///   an empty streak range or missing obstacle variants
    pub fn validate(&self) -> LevelResult<()> {
        let layout = &self.layout;
        if layout.lane_count == 0 || layout.row_count == 0 {
            return Err(LevelError::InvalidConfig(format!(
                "grid must have at least one lane and one row, got {}x{}",
                layout.lane_count, layout.row_count
            )));
        }
        if layout.lane_offsets.len() != layout.lane_count {
            return Err(LevelError::DimensionMismatch {
                what: "lane offsets",
                expected: layout.lane_count,
                actual: layout.lane_offsets.len(),
            });
        }
        if !(layout.plane_length > 0.0) {
            return Err(LevelError::InvalidConfig(format!(
                "plane length must be positive, got {}",
                layout.plane_length
            )));
        }

        for (name, value) in self.probabilities.named() {
            if !(0.0..=1.0).contains(&value) {
                return Err(LevelError::InvalidProbability { name, value });
            }
        }

        if self.obstacles.group_rows == 0 {
            return Err(LevelError::InvalidConfig(
                "obstacle group must span at least one row".to_owned(),
            ));
        }

        let collectibles = &self.collectibles;
        if collectibles.streak_min >= collectibles.streak_max {
            return Err(LevelError::InvalidConfig(format!(
                "streak range {}..{} is empty",
                collectibles.streak_min, collectibles.streak_max
            )));
        }

        if self.prefabs.obstacles.is_empty() {
            return Err(LevelError::InvalidConfig(
                "at least one obstacle prefab is required".to_owned(),
            ));
        }

        Ok(())
    }

    /// Builds the placement service from the declared pivot offsets.
    #[must_use]
    pub fn pivot_offsets(&self) -> PivotOffsets {
        self.pivot_offsets
            .iter()
            .map(|(name, offset)| (name.clone(), *offset))
            .collect()
    }
}
