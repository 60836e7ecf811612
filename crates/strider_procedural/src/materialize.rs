//! # Plane Materializer
//!
//! Turns a finished grid and collectible plan into pooled instances
//! parented under the current ground plane.
//!
//! ## World positions
//!
//! Planes are centered on their origin, so row 0 starts half a plane length
//! behind it:
//!
//! ```text
//! segment z     = origin.z - length/2 + z_bias + row_length * (row + 0.5)
//! collectible z = origin.z - length/2 + row_length * (row + 0.3) + k * spacing
//! ```
//!
//! Spawn misses are already logged by the pool; here they only leave a gap
//! and bump [`MaterializeReport::gaps`].

use rand::Rng;
use strider_core::{InstanceHandle, ObjectPoolProvider, PlacementService};
use strider_shared::{Quaternion, Vec3};

use crate::collectibles::{CollectiblePlan, CollectibleStreak};
use crate::config::{CollectibleConfig, LayoutConfig, LevelConfig, PrefabNames};
use crate::grid::{CellType, SegmentGrid};

/// The ground plane content is attached to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneAnchor {
    /// The plane instance.
    pub instance: InstanceHandle,
    /// Plane position at spawn time.
    pub origin: Vec3,
}

/// Spawn counts for one plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Platforms, ramps and obstacles spawned.
    pub segments: usize,
    /// Collectibles spawned.
    pub collectibles: usize,
    /// Spawns the pool could not serve.
    pub gaps: usize,
}

impl MaterializeReport {
    /// Everything spawned.
    #[must_use]
    pub const fn spawned(&self) -> usize {
        self.segments + self.collectibles
    }
}

/// Spawns grid content through a pool provider.
#[derive(Clone, Debug)]
pub struct PlaneMaterializer {
    layout: LayoutConfig,
    prefabs: PrefabNames,
    collectibles: CollectibleConfig,
}

impl PlaneMaterializer {
    /// Creates a materializer from a validated level config.
    #[must_use]
    pub fn from_config(config: &LevelConfig) -> Self {
        Self {
            layout: config.layout.clone(),
            prefabs: config.prefabs.clone(),
            collectibles: config.collectibles.clone(),
        }
    }

    /// World position of a grid cell on a plane at `origin`.
    ///
    /// # Panics
    ///
    /// Panics if `lane` has no configured lane offset.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn segment_position(&self, lane: usize, row: usize, origin: Vec3) -> Vec3 {
        let layout = &self.layout;
        let z = -layout.half_length()
            + layout.segment_z_bias
            + layout.row_length() * (row as f32 + layout.segment_row_fraction);
        origin + Vec3::new(layout.lane_offsets[lane], 0.0, z)
    }

    /// World position of item `k` of a streak on a plane at `origin`.
    ///
    /// # Panics
    ///
    /// Panics if the streak lane has no configured lane offset.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn collectible_position(&self, streak: &CollectibleStreak, k: u32, origin: Vec3) -> Vec3 {
        let layout = &self.layout;
        let settings = &self.collectibles;
        let y = if streak.elevated { settings.elevated_height } else { 0.0 };
        let z = -layout.half_length()
            + layout.row_length() * (streak.row as f32 + settings.row_fraction)
            + k as f32 * settings.spacing;
        origin + Vec3::new(layout.lane_offsets[streak.lane], y, z)
    }

    /// Spawns a prefab for every non-empty cell, lanes outer and rows inner.
    pub fn spawn_segments<P, S, R>(
        &self,
        grid: &SegmentGrid,
        anchor: PlaneAnchor,
        pool: &mut P,
        placement: &S,
        rng: &mut R,
    ) -> MaterializeReport
    where
        P: ObjectPoolProvider + ?Sized,
        S: PlacementService + ?Sized,
        R: Rng + ?Sized,
    {
        let mut report = MaterializeReport::default();

        for lane in 0..grid.lanes() {
            for row in 0..grid.rows() {
                let name = match grid.get(lane, row) {
                    None | Some(CellType::Empty) => continue,
                    Some(CellType::Platform) => self.prefabs.platform.as_str(),
                    Some(CellType::PlatformWithRamp) => self.prefabs.platform_with_ramp.as_str(),
                    Some(CellType::Obstacle) => {
                        let variant = rng.gen_range(0..self.prefabs.obstacles.len());
                        self.prefabs.obstacles[variant].as_str()
                    }
                };

                let position = self.segment_position(lane, row, anchor.origin);
                if spawn_attached(pool, placement, name, position, anchor.instance) {
                    report.segments += 1;
                } else {
                    report.gaps += 1;
                }
            }
        }
        report
    }

    /// Spawns every item of every planned streak.
    pub fn spawn_collectibles<P, S>(
        &self,
        plan: &CollectiblePlan,
        anchor: PlaneAnchor,
        pool: &mut P,
        placement: &S,
    ) -> MaterializeReport
    where
        P: ObjectPoolProvider + ?Sized,
        S: PlacementService + ?Sized,
    {
        let mut report = MaterializeReport::default();
        let name = self.prefabs.collectible.as_str();

        for streak in &plan.streaks {
            for k in 0..streak.count {
                let position = self.collectible_position(streak, k, anchor.origin);
                if spawn_attached(pool, placement, name, position, anchor.instance) {
                    report.collectibles += 1;
                } else {
                    report.gaps += 1;
                }
            }
        }
        report
    }
}

/// Spawns one instance, applies its pivot offset and parents it.
fn spawn_attached<P, S>(
    pool: &mut P,
    placement: &S,
    name: &str,
    position: Vec3,
    parent: InstanceHandle,
) -> bool
where
    P: ObjectPoolProvider + ?Sized,
    S: PlacementService + ?Sized,
{
    let Some(instance) = pool.spawn(name, position, Quaternion::IDENTITY) else {
        return false;
    };
    placement.apply_offset(pool, name, instance, position);
    pool.set_parent(instance, parent);
    true
}
