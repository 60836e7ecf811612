//! # Grid Populator
//!
//! Fills the shared grid in two passes, rows outer and lanes inner.
//!
//! 1. **Platforms and ramps**, followed by passability repair and a
//!    snapshot of the final row into [`BoundaryMemory`].
//! 2. **Obstacles**, at most one per group of rows, never directly in front
//!    of a platform end.

use rand::Rng;

use crate::config::{LevelConfig, Probabilities};
use crate::grid::{BoundaryMemory, CellType, SegmentGrid};
use crate::repair::{ensure_passable, RepairReport};

/// Places platforms, ramps and obstacles on a [`SegmentGrid`].
#[derive(Clone, Debug)]
pub struct GridPopulator {
    probabilities: Probabilities,
    group_rows: usize,
}

impl GridPopulator {
    /// Creates a populator from explicit settings.
    #[must_use]
    pub fn new(probabilities: Probabilities, group_rows: usize) -> Self {
        Self {
            probabilities,
            group_rows: group_rows.max(1),
        }
    }

    /// Creates a populator from a validated level config.
    #[must_use]
    pub fn from_config(config: &LevelConfig) -> Self {
        Self::new(config.probabilities.clone(), config.obstacles.group_rows)
    }

    /// Pass 1: clears the grid, places platforms and ramps, repairs the
    /// result and records the final row for the next plane.
    ///
    /// `boundary` is read for the row 0 seam before being overwritten.
    pub fn populate_platforms<R: Rng + ?Sized>(
        &self,
        grid: &mut SegmentGrid,
        boundary: &mut BoundaryMemory,
        rng: &mut R,
    ) -> RepairReport {
        let p = &self.probabilities;
        grid.clear();

        // Stays set until a row comes out fully empty.
        let mut ramp_placed = false;
        for row in 0..grid.rows() {
            for lane in 0..grid.lanes() {
                if rng.gen_bool(p.platform) {
                    grid.set(lane, row, CellType::Platform);
                    // Land on open ground after a platform.
                    grid.set(lane, row + 1, CellType::Empty);
                } else if rng.gen_bool(p.ramp)
                    && !ramp_placed
                    && row > 0
                    && grid.is_empty_at(lane, row - 1)
                {
                    grid.set(lane, row, CellType::PlatformWithRamp);
                    if row + 1 < grid.rows() && rng.gen_bool(p.ramp_continuation) {
                        grid.set(lane, row + 1, CellType::Platform);
                    }
                    ramp_placed = true;
                }
            }

            if grid.row_all_empty(row) {
                ramp_placed = false;
            }
        }

        let report = ensure_passable(grid, boundary, rng);
        boundary.record(grid);
        report
    }

    /// Pass 2: places obstacles on open ground.
    ///
    /// A cell is eligible when it is Empty and the cell behind it in the same
    /// lane is Empty too (row 0 always passes that check). Returns the number
    /// of obstacles placed.
    pub fn populate_obstacles<R: Rng + ?Sized>(&self, grid: &mut SegmentGrid, rng: &mut R) -> usize {
        let mut placed_in_group = false;
        let mut placed = 0;

        for row in 0..grid.rows() {
            if row % self.group_rows == 0 {
                placed_in_group = false;
            }
            for lane in 0..grid.lanes() {
                let eligible = grid.is_empty_at(lane, row) && (row == 0 || grid.is_empty_at(lane, row - 1));
                if eligible && !placed_in_group && rng.gen_bool(self.probabilities.obstacle) {
                    grid.set(lane, row, CellType::Obstacle);
                    placed_in_group = true;
                    placed += 1;
                    tracing::trace!("obstacle at lane {lane} row {row}");
                }
            }
        }
        placed
    }
}
