//! # Level Runner
//!
//! The frame-driven half of the level:
//! ```text
//! Tick N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. SCROLL                                                           │
//! │    └─ Every active plane (and its content) moves backward           │
//! │                                                                     │
//! │ 2. RECYCLE                                                          │
//! │    ├─ Planes behind the boundary hand their children back           │
//! │    └─ ...then return themselves to the ground plane pool            │
//! │                                                                     │
//! │ 3. READINESS (late update)                                          │
//! │    └─ Ground plane free in the pool? Generate the next plane        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::VecDeque;

use strider_core::{InstanceHandle, ObjectPool, ObjectPoolProvider};
use strider_procedural::{LevelConfig, LevelSeed, PlaneAnchor, PlaneReport, PlaneSequencer};
use strider_shared::Vec3;

use crate::error::RunnerResult;

/// Runner configuration.
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Plane speed in units per second.
    pub scroll_speed: f32,
    /// Planes whose z drops below this are recycled.
    pub backward_boundary: f32,
    /// Multiplier on the scroll speed (score multiplier in game).
    pub speed_modifier: f32,
    /// Longest tick accepted; longer deltas are clamped.
    pub max_delta: f32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            scroll_speed: 10.0,
            backward_boundary: -45.0,
            speed_modifier: 1.0,
            max_delta: 0.1,
        }
    }
}

/// Instances registered per pool.
#[derive(Clone, Debug)]
pub struct PoolCapacities {
    /// Ground planes (limits how far ahead the level is generated).
    pub ground_planes: usize,
    /// Platforms.
    pub platforms: usize,
    /// Platforms with ramps.
    pub ramps: usize,
    /// Each obstacle variant.
    pub obstacles_each: usize,
    /// Collectibles.
    pub collectibles: usize,
}

impl Default for PoolCapacities {
    fn default() -> Self {
        Self {
            ground_planes: 3,
            platforms: 64,
            ramps: 32,
            obstacles_each: 16,
            collectibles: 128,
        }
    }
}

/// Builds an object pool holding every prefab `config` names.
///
/// Inactive instances are parked below the level.
///
/// # Errors
///
/// Returns a pool error if a prefab is named twice or a capacity is zero.
pub fn build_pool(config: &LevelConfig, capacities: &PoolCapacities) -> RunnerResult<ObjectPool> {
    let prefabs = &config.prefabs;
    let mut pool = ObjectPool::new(Vec3::new(0.0, -100.0, 0.0));

    pool.register(&prefabs.ground_plane, capacities.ground_planes)?;
    pool.register(&prefabs.platform, capacities.platforms)?;
    pool.register(&prefabs.platform_with_ramp, capacities.ramps)?;
    for name in &prefabs.obstacles {
        pool.register(name, capacities.obstacles_each)?;
    }
    pool.register(&prefabs.collectible, capacities.collectibles)?;

    Ok(pool)
}

/// Running totals.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunnerStats {
    /// Ticks processed.
    pub ticks: u64,
    /// Populated planes generated.
    pub planes_generated: u64,
    /// Planes returned to the pool.
    pub planes_recycled: u64,
    /// Platforms, obstacles and coins returned with their planes.
    pub content_recycled: u64,
    /// Spawns the pools could not serve.
    pub gaps: u64,
    /// Distance scrolled.
    pub distance: f32,
}

/// Drives a [`PlaneSequencer`] from a frame loop.
pub struct LevelRunner {
    sequencer: PlaneSequencer<ObjectPool>,
    config: RunnerConfig,
    /// Active planes, oldest first.
    planes: VecDeque<InstanceHandle>,
    running: bool,
    stats: RunnerStats,
    last_report: Option<PlaneReport>,
}

impl LevelRunner {
    /// Creates a runner around an existing sequencer.
    #[must_use]
    pub fn new(sequencer: PlaneSequencer<ObjectPool>, config: RunnerConfig) -> Self {
        Self {
            sequencer,
            config,
            planes: VecDeque::new(),
            running: true,
            stats: RunnerStats::default(),
            last_report: None,
        }
    }

    /// Builds pools, sequencer and runner in one go.
    ///
    /// # Errors
    ///
    /// Returns an error if the level config is invalid or a pool cannot be
    /// registered.
    pub fn from_level_config(
        level: LevelConfig,
        capacities: &PoolCapacities,
        seed: LevelSeed,
        config: RunnerConfig,
    ) -> RunnerResult<Self> {
        let pool = build_pool(&level, capacities)?;
        let sequencer = PlaneSequencer::with_config_offsets(level, pool, seed)?;
        Ok(Self::new(sequencer, config))
    }

    /// Advances the level by `dt` seconds.
    ///
    /// Returns the report of the plane generated this tick, if any.
    ///
    /// # Errors
    ///
    /// Propagates [`strider_procedural::LevelError::PlaneLost`] from the
    /// sequencer.
    pub fn tick(&mut self, dt: f32) -> RunnerResult<Option<PlaneReport>> {
        self.stats.ticks += 1;

        if self.running {
            let dt = dt.clamp(0.0, self.config.max_delta);
            let step = self.config.scroll_speed * self.config.speed_modifier * dt;
            self.scroll(step);
            self.recycle();
        }

        let ground = self.sequencer.config().prefabs.ground_plane.as_str();
        if !self.sequencer.pool().has_available(ground) {
            return Ok(None);
        }

        let report = self.sequencer.generate_next()?;
        match &report {
            Some(report) => {
                if let Some(first) = report.first_plane {
                    self.track(first);
                }
                self.track(report.plane);
                self.stats.planes_generated += 1;
                self.stats.gaps += report.materialized.gaps as u64;
                self.last_report = Some(report.clone());
            }
            None => {
                if let Some(last) = self.sequencer.last_plane() {
                    self.track(last);
                }
            }
        }
        Ok(report)
    }

    /// Stops scrolling (game over). Generation still follows readiness.
    pub fn stop(&mut self) {
        self.running = false;
        tracing::info!("runner stopped after {:.1} units", self.stats.distance);
    }

    /// Returns true until [`LevelRunner::stop`] is called.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Changes the speed multiplier.
    pub fn set_speed_modifier(&mut self, modifier: f32) {
        self.config.speed_modifier = modifier;
    }

    /// Running totals.
    #[must_use]
    pub fn stats(&self) -> RunnerStats {
        self.stats
    }

    /// Active planes, oldest first.
    pub fn planes(&self) -> impl Iterator<Item = InstanceHandle> + '_ {
        self.planes.iter().copied()
    }

    /// The most recent generation report.
    #[must_use]
    pub fn last_report(&self) -> Option<&PlaneReport> {
        self.last_report.as_ref()
    }

    /// The driven sequencer.
    #[must_use]
    pub fn sequencer(&self) -> &PlaneSequencer<ObjectPool> {
        &self.sequencer
    }

    fn track(&mut self, plane: PlaneAnchor) {
        if !self.planes.contains(&plane.instance) {
            self.planes.push_back(plane.instance);
        }
    }

    fn scroll(&mut self, step: f32) {
        let delta = Vec3::BACK * step;
        let pool = self.sequencer.pool_mut();
        for &plane in &self.planes {
            pool.translate(plane, delta);
        }
        self.stats.distance += step;
    }

    fn recycle(&mut self) {
        let boundary = self.config.backward_boundary;
        let ground = self.sequencer.config().prefabs.ground_plane.clone();
        let pool = self.sequencer.pool_mut();

        let mut kept = VecDeque::with_capacity(self.planes.len());
        for plane in self.planes.drain(..) {
            let behind = pool.position(plane).map_or(true, |p| p.z < boundary);
            if !behind {
                kept.push_back(plane);
                continue;
            }

            // Children first, so none of them is parked while still attached
            let children = pool.release_children(plane);
            pool.release(&ground, plane);
            self.stats.planes_recycled += 1;
            self.stats.content_recycled += children as u64;
            tracing::info!("recycled plane {plane:?} with {children} children");
        }
        self.planes = kept;
    }
}
