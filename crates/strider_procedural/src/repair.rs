//! # Passability Repair
//!
//! Runs once per grid, right after platforms and ramps are placed and
//! before obstacles. Repairs only ever clear cells to Empty, so a fix made
//! in one row can never be undone by a later one.
//!
//! ## Rules
//!
//! - **Seam (row 0)**: a lane that was open at the end of the previous plane
//!   cannot start this plane with a platform. One random lane of row 0 is
//!   cleared unconditionally.
//! - **Path (rows > 0)**: a lane open in the previous row stays open unless
//!   a ramp takes the player up, or a neighboring lane is already open.
//! - **Checkerboard (middle lane)**: a middle platform with both diagonals
//!   blocked (one row behind or one row ahead) leaves no way around it; one
//!   diagonal is cleared at random.
//!
//!   ```text
//!   o x o        x o x
//!   x o x   or   o x o      o = open, x = blocked
//!   ```
//!
//! - **Ramp fallback**: if the only lane carried open from the previous row
//!   now holds a ramp, the row would have no ground lane left; a non-ramp
//!   lane beside the open path is cleared.
//!
//! Neighbor lookups outside the grid mean "not applicable": no correction is
//! attempted and nothing fails.

use rand::Rng;

use crate::grid::{BoundaryMemory, CellType, SegmentGrid};

/// What the repairer changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Row 0 platforms cleared to continue an open lane from the previous plane.
    pub seam_clears: usize,
    /// Row 0 lane forced open.
    pub forced_lane: Option<usize>,
    /// Cells cleared to carry an open lane forward.
    pub path_clears: usize,
    /// Diagonal cells cleared around a middle-lane platform.
    pub checkerboard_clears: usize,
    /// Cells cleared because a ramp swallowed the only open lane.
    pub fallback_clears: usize,
}

impl RepairReport {
    /// Total cells changed (the forced row 0 lane is not counted).
    #[must_use]
    pub const fn total_clears(&self) -> usize {
        self.seam_clears + self.path_clears + self.checkerboard_clears + self.fallback_clears
    }
}

/// Guarantees at least one Empty lane in every row of `grid`.
pub fn ensure_passable<R: Rng + ?Sized>(
    grid: &mut SegmentGrid,
    boundary: &BoundaryMemory,
    rng: &mut R,
) -> RepairReport {
    let mut report = RepairReport::default();
    if grid.lanes() == 0 || grid.rows() == 0 {
        return report;
    }

    repair_seam(grid, boundary, rng, &mut report);

    // Row 0 has nothing behind it, but row 1 can still wall it in.
    let middle = grid.lanes() / 2;
    break_checkerboard(grid, middle, 0, rng, &mut report);

    for row in 1..grid.rows() {
        for lane in 0..grid.lanes() {
            carry_path(grid, lane, row, &mut report);
            if lane == middle {
                break_checkerboard(grid, lane, row, rng, &mut report);
            }
        }
        if !grid.row_has_empty(row) {
            open_beside_ramp(grid, row, rng, &mut report);
        }
    }

    tracing::debug!(
        "repair: seam={} forced={:?} path={} checkerboard={} fallback={}",
        report.seam_clears,
        report.forced_lane,
        report.path_clears,
        report.checkerboard_clears,
        report.fallback_clears
    );
    report
}

fn repair_seam<R: Rng + ?Sized>(
    grid: &mut SegmentGrid,
    boundary: &BoundaryMemory,
    rng: &mut R,
    report: &mut RepairReport,
) {
    for lane in 0..grid.lanes() {
        let was_open = boundary.get(lane).is_some_and(CellType::is_empty);
        if was_open && grid.get(lane, 0) == Some(CellType::Platform) {
            grid.set(lane, 0, CellType::Empty);
            report.seam_clears += 1;
        }
    }

    let forced = rng.gen_range(0..grid.lanes());
    grid.set(forced, 0, CellType::Empty);
    report.forced_lane = Some(forced);
}

fn carry_path(grid: &mut SegmentGrid, lane: usize, row: usize, report: &mut RepairReport) {
    let Some(cell) = grid.get(lane, row) else {
        return;
    };
    if cell.is_empty() || cell == CellType::PlatformWithRamp || !grid.is_empty_at(lane, row - 1) {
        return;
    }

    let left_open = grid.neighbor(lane, row, -1, 0).is_some_and(CellType::is_empty);
    let right_open = grid.neighbor(lane, row, 1, 0).is_some_and(CellType::is_empty);
    if !left_open && !right_open {
        grid.set(lane, row, CellType::Empty);
        report.path_clears += 1;
        tracing::trace!("repair: carried lane {lane} open into row {row}");
    }
}

fn break_checkerboard<R: Rng + ?Sized>(
    grid: &mut SegmentGrid,
    lane: usize,
    row: usize,
    rng: &mut R,
    report: &mut RepairReport,
) {
    if grid.get(lane, row) != Some(CellType::Platform) {
        return;
    }

    for d_row in [-1, 1] {
        let left = grid.neighbor(lane, row, -1, d_row);
        let right = grid.neighbor(lane, row, 1, d_row);
        let (Some(left), Some(right)) = (left, right) else {
            continue;
        };
        if left.is_empty() || right.is_empty() {
            continue;
        }

        let side: isize = if rng.gen_bool(0.5) { -1 } else { 1 };
        let (Some(target_lane), Some(target_row)) = (
            lane.checked_add_signed(side),
            row.checked_add_signed(d_row),
        ) else {
            continue;
        };
        grid.set(target_lane, target_row, CellType::Empty);
        report.checkerboard_clears += 1;
        tracing::trace!("repair: checkerboard cleared lane {target_lane} row {target_row}");
    }
}

fn open_beside_ramp<R: Rng + ?Sized>(
    grid: &mut SegmentGrid,
    row: usize,
    rng: &mut R,
    report: &mut RepairReport,
) {
    let lanes = grid.lanes();
    let beside_open_path = |lane: usize| {
        grid.neighbor(lane, row, -1, -1).is_some_and(CellType::is_empty)
            || grid.neighbor(lane, row, 1, -1).is_some_and(CellType::is_empty)
    };

    let mut candidates: Vec<usize> = (0..lanes)
        .filter(|&lane| grid.get(lane, row) != Some(CellType::PlatformWithRamp))
        .filter(|&lane| beside_open_path(lane))
        .collect();
    if candidates.is_empty() {
        candidates = (0..lanes)
            .filter(|&lane| grid.get(lane, row) != Some(CellType::PlatformWithRamp))
            .collect();
    }
    if candidates.is_empty() {
        // Single-lane grid holding a ramp: open the ramp lane itself.
        candidates = (0..lanes).collect();
    }

    let lane = candidates[rng.gen_range(0..candidates.len())];
    grid.set(lane, row, CellType::Empty);
    report.fallback_clears += 1;
    tracing::trace!("repair: ramp fallback cleared lane {lane} row {row}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::LevelSeed;
    use super::CellType::{Empty as E, Platform as P, PlatformWithRamp as R};

    fn rows(grid: &SegmentGrid) -> Vec<Vec<CellType>> {
        (0..grid.rows()).map(|r| grid.row(r).to_vec()).collect()
    }

    #[test]
    fn test_seam_continuity() {
        let mut grid = SegmentGrid::from_rows(&[vec![P, P, P]]).unwrap();
        let boundary = BoundaryMemory::from_cells(vec![E, P, P]);
        let mut rng = LevelSeed::new(7).rng();

        let report = ensure_passable(&mut grid, &boundary, &mut rng);

        assert_eq!(grid.get(0, 0), Some(E));
        assert_eq!(report.seam_clears, 1);
        let forced = report.forced_lane.unwrap();
        assert_eq!(grid.get(forced, 0), Some(E));
    }

    #[test]
    fn test_forced_lane_clears_ramps_too() {
        for seed in 0..20 {
            let mut grid = SegmentGrid::from_rows(&[vec![R, R, R]]).unwrap();
            let boundary = BoundaryMemory::from_cells(vec![P, P, P]);
            let mut rng = LevelSeed::new(seed).rng();

            ensure_passable(&mut grid, &boundary, &mut rng);

            assert_eq!(grid.count(E), 1);
        }
    }

    #[test]
    fn test_path_carried_forward() {
        // Lane 0 open in row 0, row 1 fully blocked by platforms.
        let mut grid = SegmentGrid::from_rows(&[vec![E, E, E], vec![P, P, P]]).unwrap();
        let boundary = BoundaryMemory::new(3);
        let mut rng = LevelSeed::new(1).rng();

        let report = ensure_passable(&mut grid, &boundary, &mut rng);

        // Lane 0: prev open, right neighbor blocked, left out of grid -> cleared.
        // Lane 1 then sees an open left neighbor and stays; lane 2 does not.
        assert_eq!(grid.row(1), &[E, P, E]);
        assert_eq!(report.path_clears, 2);
    }

    #[test]
    fn test_open_neighbor_keeps_platform() {
        let mut grid = SegmentGrid::from_rows(&[vec![E, E, P], vec![P, E, P]]).unwrap();
        let boundary = BoundaryMemory::from_cells(vec![P, P, P]);
        // Seed whose forced lane is irrelevant: row 0 lane 0 is already open.
        let mut rng = LevelSeed::new(3).rng();

        ensure_passable(&mut grid, &boundary, &mut rng);

        assert_eq!(grid.get(0, 1), Some(P));
        assert!(grid.row_has_empty(1));
    }

    #[test]
    fn test_checkerboard_behind() {
        // row 1:  . P .   middle platform
        // row 0:  P . P   both diagonals blocked
        let grid = SegmentGrid::from_rows(&[vec![P, E, P], vec![E, P, E]]).unwrap();
        let boundary = BoundaryMemory::from_cells(vec![P, P, P]);

        for seed in 0..20 {
            let mut g = grid.clone();
            let mut rng = LevelSeed::new(seed).rng();
            let report = ensure_passable(&mut g, &boundary, &mut rng);

            let left = g.get(0, 0) == Some(E);
            let right = g.get(2, 0) == Some(E);
            assert!(left || right, "seed {seed}: {:?}", rows(&g));
            if report.forced_lane == Some(1) {
                assert_eq!(report.checkerboard_clears, 1);
            }
        }
    }

    #[test]
    fn test_checkerboard_ahead_of_row_zero() {
        // row 1:  P . P   both diagonals ahead blocked
        // row 0:  P P P   forced lane opens one cell
        let grid = SegmentGrid::from_rows(&[vec![P, P, P], vec![P, E, P]]).unwrap();
        let boundary = BoundaryMemory::from_cells(vec![P, P, P]);

        for seed in 0..20 {
            let mut g = grid.clone();
            let mut rng = LevelSeed::new(seed).rng();
            let report = ensure_passable(&mut g, &boundary, &mut rng);

            if g.get(1, 0) == Some(P) {
                assert_eq!(report.checkerboard_clears, 1, "seed {seed}: {:?}", rows(&g));
                assert!(g.get(0, 1) == Some(E) || g.get(2, 1) == Some(E));
            } else {
                assert_eq!(report.forced_lane, Some(1));
                assert_eq!(report.checkerboard_clears, 0);
            }
        }
    }

    #[test]
    fn test_checkerboard_ahead() {
        // row 2:  P . P   both diagonals ahead blocked
        // row 1:  . P .   middle platform
        // row 0:  . . .
        let grid =
            SegmentGrid::from_rows(&[vec![E, E, E], vec![E, P, E], vec![P, E, P]]).unwrap();
        let boundary = BoundaryMemory::new(3);

        for seed in 0..20 {
            let mut g = grid.clone();
            let mut rng = LevelSeed::new(seed).rng();
            let report = ensure_passable(&mut g, &boundary, &mut rng);

            assert_eq!(report.checkerboard_clears, 1);
            assert_eq!(g.row(2).iter().filter(|c| c.is_empty()).count(), 2);
        }
    }

    #[test]
    fn test_checkerboard_out_of_bounds_is_ignored() {
        // Middle platform on the last row: nothing ahead to inspect.
        let mut grid = SegmentGrid::from_rows(&[vec![E, E, E], vec![E, P, E]]).unwrap();
        let boundary = BoundaryMemory::new(3);
        let mut rng = LevelSeed::new(11).rng();

        let report = ensure_passable(&mut grid, &boundary, &mut rng);

        assert_eq!(report.checkerboard_clears, 0);
        assert_eq!(grid.get(1, 1), Some(P));
    }

    #[test]
    fn test_ramp_fallback() {
        // Only lane 1 is open in row 1; row 2 puts a ramp there and platforms
        // either side.
        let grid = SegmentGrid::from_rows(&[
            vec![E, E, E],
            vec![P, E, P],
            vec![P, R, P],
        ])
        .unwrap();
        let boundary = BoundaryMemory::new(3);

        for seed in 0..20 {
            let mut g = grid.clone();
            let mut rng = LevelSeed::new(seed).rng();
            let report = ensure_passable(&mut g, &boundary, &mut rng);

            assert!(g.row_has_empty(2), "seed {seed}: {:?}", rows(&g));
            assert_eq!(g.get(1, 2), Some(R));
            assert_eq!(report.fallback_clears, 1);
        }
    }
}
