//! # Collectible Planner
//!
//! Decides where coin streaks go once the grid is final. Streaks start on
//! ramps (raised) or on obstacles (ground level) and run forward along the
//! lane.
//!
//! The cap counts *drawn* streak lengths. A streak is only started while the
//! drawn total is below the cap, so the streak that crosses it can overshoot:
//! with a cap of 15 and lengths below 8, at most 14 + 7 = 21 are drawn.

use rand::Rng;

use crate::config::CollectibleConfig;
use crate::grid::{CellType, SegmentGrid};

/// One planned run of collectibles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollectibleStreak {
    /// Lane of the seed cell.
    pub lane: usize,
    /// Row of the seed cell.
    pub row: usize,
    /// Length drawn for this streak (counted against the cap).
    pub drawn: u32,
    /// Items to spawn.
    pub count: u32,
    /// True when the streak rides on top of a ramp.
    pub elevated: bool,
}

/// Every streak planned for one grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectiblePlan {
    /// Streaks in scan order.
    pub streaks: Vec<CollectibleStreak>,
    /// Sum of drawn lengths.
    pub drawn_total: u32,
    /// True if the drawn total reached the cap.
    pub capped: bool,
}

impl CollectiblePlan {
    /// Items that will actually be spawned.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.streaks
            .iter()
            .fold(0u32, |total, s| total.saturating_add(s.count))
    }
}

/// Plans collectible streaks over a finished grid.
#[derive(Clone, Debug)]
pub struct CollectiblePlanner {
    settings: CollectibleConfig,
    chance: f64,
}

impl CollectiblePlanner {
    /// Creates a planner. `chance` is the probability that a candidate cell
    /// seeds a streak.
    #[must_use]
    pub fn new(settings: CollectibleConfig, chance: f64) -> Self {
        Self { settings, chance }
    }

    /// Scans rows in order and lanes left to right. Only one streak may
    /// start per row.
    pub fn plan<R: Rng + ?Sized>(&self, grid: &SegmentGrid, rng: &mut R) -> CollectiblePlan {
        let mut plan = CollectiblePlan::default();
        let extra = u32::from(self.settings.inclusive_streak_bound);

        'rows: for row in 0..grid.rows() {
            let mut placed_in_row = false;
            for lane in 0..grid.lanes() {
                if plan.drawn_total >= self.settings.cap {
                    break 'rows;
                }
                if placed_in_row {
                    break;
                }

                let Some(cell) = grid.get(lane, row) else {
                    continue;
                };
                let candidate = matches!(cell, CellType::PlatformWithRamp | CellType::Obstacle);
                if !candidate || !rng.gen_bool(self.chance) {
                    continue;
                }

                let drawn = rng.gen_range(self.settings.streak_min..self.settings.streak_max);
                plan.streaks.push(CollectibleStreak {
                    lane,
                    row,
                    drawn,
                    count: drawn + extra,
                    elevated: matches!(cell, CellType::PlatformWithRamp | CellType::Platform),
                });
                // Never wraps; a saturated total always meets the cap
                plan.drawn_total = plan.drawn_total.saturating_add(drawn);
                placed_in_row = true;
            }
        }

        plan.capped = plan.drawn_total >= self.settings.cap;
        tracing::trace!(
            "collectibles: {} streaks, {} drawn, capped={}",
            plan.streaks.len(),
            plan.drawn_total,
            plan.capped
        );
        plan
    }
}
