//! # Plane Sequencer
//!
//! Owns the pool provider, the shared grid, the boundary memory and the
//! random generator, and drives one full generation cycle per request:
//!
//! ```text
//! spawn plane -> platforms/ramps -> repair -> boundary snapshot
//!             -> obstacles -> collectible plan -> materialize
//! ```
//!
//! The sequencer never polls the pool for readiness. The driving loop
//! checks [`ObjectPoolProvider::has_available`] for the ground plane pool
//! and calls [`PlaneSequencer::generate_next`] when it returns true.

use strider_core::{ObjectPoolProvider, PivotOffsets, PlacementService};
use strider_shared::{Quaternion, Vec3};

use crate::collectibles::{CollectiblePlan, CollectiblePlanner};
use crate::config::LevelConfig;
use crate::error::{LevelError, LevelResult};
use crate::grid::{BoundaryMemory, SegmentGrid};
use crate::materialize::{MaterializeReport, PlaneAnchor, PlaneMaterializer};
use crate::populate::GridPopulator;
use crate::repair::RepairReport;
use crate::seed::{LevelRng, LevelSeed};

/// Where the sequencer is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    /// Nothing spawned yet.
    Uninitialized,
    /// The origin plane exists but no populated plane has followed it.
    FirstPlane,
    /// Every request spawns and populates one more plane.
    Rolling,
}

/// Summary of one generated plane.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneReport {
    /// Populated planes generated so far, this one included.
    pub index: u64,
    /// The new plane.
    pub plane: PlaneAnchor,
    /// The unpopulated origin plane, when this request also spawned it.
    pub first_plane: Option<PlaneAnchor>,
    /// Corrections made by the passability repairer.
    pub repair: RepairReport,
    /// Obstacles placed.
    pub obstacles: usize,
    /// Collectible streaks planned.
    pub collectibles: CollectiblePlan,
    /// Instances spawned (and misses) for segments and collectibles.
    pub materialized: MaterializeReport,
}

/// Generates ground planes one after another.
pub struct PlaneSequencer<P, S = PivotOffsets> {
    config: LevelConfig,
    pool: P,
    placement: S,
    populator: GridPopulator,
    planner: CollectiblePlanner,
    materializer: PlaneMaterializer,
    grid: SegmentGrid,
    boundary: BoundaryMemory,
    seed: LevelSeed,
    rng: LevelRng,
    state: SequencerState,
    last_plane: Option<PlaneAnchor>,
    planes_generated: u64,
}

impl<P: ObjectPoolProvider> PlaneSequencer<P, PivotOffsets> {
    /// Creates a sequencer that applies the pivot offsets declared in
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns any [`LevelConfig::validate`] error.
    pub fn with_config_offsets(config: LevelConfig, pool: P, seed: LevelSeed) -> LevelResult<Self> {
        let placement = config.pivot_offsets();
        Self::new(config, pool, placement, seed)
    }
}

impl<P: ObjectPoolProvider, S: PlacementService> PlaneSequencer<P, S> {
    /// Creates a sequencer and allocates its grid and boundary memory.
    ///
    /// # Errors
    ///
    /// Returns any [`LevelConfig::validate`] error.
    pub fn new(config: LevelConfig, pool: P, placement: S, seed: LevelSeed) -> LevelResult<Self> {
        config.validate()?;

        let grid = SegmentGrid::new(config.layout.lane_count, config.layout.row_count);
        let boundary = BoundaryMemory::new(config.layout.lane_count);
        boundary.check_against(&grid)?;

        tracing::debug!(
            "sequencer: {}x{} grid, seed {:#x}",
            grid.lanes(),
            grid.rows(),
            seed.value()
        );

        Ok(Self {
            populator: GridPopulator::from_config(&config),
            planner: CollectiblePlanner::new(
                config.collectibles.clone(),
                config.probabilities.collectible,
            ),
            materializer: PlaneMaterializer::from_config(&config),
            config,
            pool,
            placement,
            grid,
            boundary,
            seed,
            rng: seed.rng(),
            state: SequencerState::Uninitialized,
            last_plane: None,
            planes_generated: 0,
        })
    }

    /// Replaces the boundary memory, e.g. to continue a level generated
    /// elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::DimensionMismatch`] if `boundary` does not have
    /// one cell per lane.
    pub fn with_boundary(mut self, boundary: BoundaryMemory) -> LevelResult<Self> {
        boundary.check_against(&self.grid)?;
        self.boundary = boundary;
        Ok(self)
    }

    /// Spawns the next plane and fills it.
    ///
    /// The first call also spawns the unpopulated origin plane. Returns
    /// `Ok(None)` if the ground plane pool could not serve the request; the
    /// call can simply be repeated once a plane has been released.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::PlaneLost`] if the previous plane was released
    /// to the pool before its successor was generated.
    pub fn generate_next(&mut self) -> LevelResult<Option<PlaneReport>> {
        let mut first_plane = None;
        if self.state == SequencerState::Uninitialized {
            let Some(anchor) = self.spawn_first_plane() else {
                return Ok(None);
            };
            first_plane = Some(anchor);
        }

        let previous = self.last_plane.ok_or(LevelError::PlaneLost)?;
        let previous_position = self
            .pool
            .position(previous.instance)
            .ok_or(LevelError::PlaneLost)?;
        let origin = previous_position + Vec3::FORWARD * self.config.layout.plane_length;

        let Some(instance) =
            self.pool
                .spawn(&self.config.prefabs.ground_plane, origin, Quaternion::IDENTITY)
        else {
            return Ok(None);
        };
        let anchor = PlaneAnchor { instance, origin };

        let repair = self
            .populator
            .populate_platforms(&mut self.grid, &mut self.boundary, &mut self.rng);
        let obstacles = self.populator.populate_obstacles(&mut self.grid, &mut self.rng);
        let collectibles = self.planner.plan(&self.grid, &mut self.rng);

        let mut materialized = self.materializer.spawn_segments(
            &self.grid,
            anchor,
            &mut self.pool,
            &self.placement,
            &mut self.rng,
        );
        let coins =
            self.materializer
                .spawn_collectibles(&collectibles, anchor, &mut self.pool, &self.placement);
        materialized.collectibles = coins.collectibles;
        materialized.gaps += coins.gaps;

        self.last_plane = Some(anchor);
        self.state = SequencerState::Rolling;
        self.planes_generated += 1;

        tracing::debug!(
            "plane {} at z={:.1}: {} repairs, {} obstacles, {} coins, {} gaps",
            self.planes_generated,
            origin.z,
            repair.total_clears(),
            obstacles,
            materialized.collectibles,
            materialized.gaps
        );
        tracing::trace!("plane {} grid:\n{}", self.planes_generated, self.grid);

        Ok(Some(PlaneReport {
            index: self.planes_generated,
            plane: anchor,
            first_plane,
            repair,
            obstacles,
            collectibles,
            materialized,
        }))
    }

    /// Spawns the origin plane. Returns `None` if the pool could not serve it.
    fn spawn_first_plane(&mut self) -> Option<PlaneAnchor> {
        let origin = self.config.layout.first_plane_origin;
        let Some(instance) =
            self.pool
                .spawn(&self.config.prefabs.ground_plane, origin, Quaternion::IDENTITY)
        else {
            tracing::warn!("could not spawn the first ground plane");
            return None;
        };

        let anchor = PlaneAnchor { instance, origin };
        self.last_plane = Some(anchor);
        self.state = SequencerState::FirstPlane;
        tracing::debug!("first plane spawned at {origin:?}");
        Some(anchor)
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SequencerState {
        self.state
    }

    /// The grid of the most recently generated plane.
    #[must_use]
    pub const fn grid(&self) -> &SegmentGrid {
        &self.grid
    }

    /// Final row of the most recently generated plane (after repair, before
    /// obstacles).
    #[must_use]
    pub const fn boundary(&self) -> &BoundaryMemory {
        &self.boundary
    }

    /// The newest plane, if any.
    #[must_use]
    pub const fn last_plane(&self) -> Option<PlaneAnchor> {
        self.last_plane
    }

    /// Populated planes generated so far (the origin plane is not counted).
    #[must_use]
    pub const fn planes_generated(&self) -> u64 {
        self.planes_generated
    }

    /// The seed this run was started with.
    #[must_use]
    pub const fn seed(&self) -> LevelSeed {
        self.seed
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// The owned pool provider.
    #[must_use]
    pub const fn pool(&self) -> &P {
        &self.pool
    }

    /// Mutable access to the owned pool provider.
    pub fn pool_mut(&mut self) -> &mut P {
        &mut self.pool
    }
}
