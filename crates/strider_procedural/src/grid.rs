//! # Segment Grid
//!
//! The content plan of one ground plane: `lanes x rows` typed cells.
//!
//! ## Layout
//!
//! ```text
//!   row 9  . P .      <- far end of the plane, copied into BoundaryMemory
//!   ...
//!   row 0  . R O      <- seam with the previous plane
//!        lane 0 1 2
//! ```
//!
//! One grid is allocated when the sequencer starts and reused for every
//! plane. The populator, the repairer and the collectible planner all work
//! on that same buffer and must run strictly one after another.

use std::fmt;

use crate::error::{LevelError, LevelResult};

/// What occupies one lane-row cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellType {
    /// Open ground.
    #[default]
    Empty = 0,
    /// Raised platform; blocks the ground lane.
    Platform = 1,
    /// Platform with a ramp leading onto it.
    PlatformWithRamp = 2,
    /// Ground obstacle (jump, slide or wall).
    Obstacle = 3,
}

impl CellType {
    /// Returns true for open ground.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// One-character form used in grid dumps.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Platform => 'P',
            Self::PlatformWithRamp => 'R',
            Self::Obstacle => 'O',
        }
    }
}

/// A fixed-size lane x row grid of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentGrid {
    lanes: usize,
    rows: usize,
    /// Cell data (indexed as [row][lane]).
    cells: Box<[CellType]>,
}

impl SegmentGrid {
    /// Creates a grid with every cell Empty.
    #[must_use]
    pub fn new(lanes: usize, rows: usize) -> Self {
        Self {
            lanes,
            rows,
            cells: vec![CellType::Empty; lanes * rows].into_boxed_slice(),
        }
    }

    /// Builds a grid from rows listed nearest-first (row 0 first).
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::DimensionMismatch`] if the rows differ in width.
    pub fn from_rows(rows: &[Vec<CellType>]) -> LevelResult<Self> {
        let lanes = rows.first().map_or(0, Vec::len);
        let mut grid = Self::new(lanes, rows.len());
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != lanes {
                return Err(LevelError::DimensionMismatch {
                    what: "grid row",
                    expected: lanes,
                    actual: cells.len(),
                });
            }
            for (lane, &cell) in cells.iter().enumerate() {
                grid.set(lane, row, cell);
            }
        }
        Ok(grid)
    }

    /// Number of lanes.
    #[inline]
    #[must_use]
    pub const fn lanes(&self) -> usize {
        self.lanes
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Gets a cell, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, lane: usize, row: usize) -> Option<CellType> {
        if lane < self.lanes && row < self.rows {
            Some(self.cells[row * self.lanes + lane])
        } else {
            None
        }
    }

    /// Gets the cell at a signed offset from `(lane, row)`, or `None` if the
    /// offset leaves the grid.
    #[must_use]
    pub fn neighbor(&self, lane: usize, row: usize, d_lane: isize, d_row: isize) -> Option<CellType> {
        let lane = lane.checked_add_signed(d_lane)?;
        let row = row.checked_add_signed(d_row)?;
        self.get(lane, row)
    }

    /// Returns true if the cell exists and is Empty.
    #[inline]
    #[must_use]
    pub fn is_empty_at(&self, lane: usize, row: usize) -> bool {
        self.get(lane, row).is_some_and(CellType::is_empty)
    }

    /// Sets a cell. Writes outside the grid are ignored.
    #[inline]
    pub fn set(&mut self, lane: usize, row: usize, cell: CellType) {
        if lane < self.lanes && row < self.rows {
            self.cells[row * self.lanes + lane] = cell;
        }
    }

    /// Resets every cell to Empty.
    pub fn clear(&mut self) {
        self.cells.fill(CellType::Empty);
    }

    /// All cells of one row, lane 0 first.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn row(&self, row: usize) -> &[CellType] {
        let start = row * self.lanes;
        &self.cells[start..start + self.lanes]
    }

    /// Returns true if any lane of `row` is Empty.
    #[must_use]
    pub fn row_has_empty(&self, row: usize) -> bool {
        self.row(row).iter().any(|c| c.is_empty())
    }

    /// Returns true if every lane of `row` is Empty.
    #[must_use]
    pub fn row_all_empty(&self, row: usize) -> bool {
        self.row(row).iter().all(|c| c.is_empty())
    }

    /// Counts cells of one type.
    #[must_use]
    pub fn count(&self, cell: CellType) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Iterates `(lane, row, cell)` row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, CellType)> + '_ {
        let lanes = self.lanes;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i % lanes, i / lanes, cell))
    }
}

impl fmt::Display for SegmentGrid {
    /// Far rows on top, the seam row at the bottom.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            write!(f, "{row:>3} ")?;
            for cell in self.row(row) {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The last row of the previous plane's grid, one cell per lane.
///
/// Read by the repairer when fixing row 0 of the next grid and overwritten
/// at the end of every populate cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundaryMemory {
    cells: Box<[CellType]>,
}

impl BoundaryMemory {
    /// Creates a boundary with every lane Empty (the state before any plane).
    #[must_use]
    pub fn new(lanes: usize) -> Self {
        Self {
            cells: vec![CellType::Empty; lanes].into_boxed_slice(),
        }
    }

    /// Creates a boundary from explicit lane contents.
    #[must_use]
    pub fn from_cells(cells: Vec<CellType>) -> Self {
        Self {
            cells: cells.into_boxed_slice(),
        }
    }

    /// Number of lanes recorded.
    #[must_use]
    pub fn lanes(&self) -> usize {
        self.cells.len()
    }

    /// Gets a lane, or `None` out of bounds.
    #[must_use]
    pub fn get(&self, lane: usize) -> Option<CellType> {
        self.cells.get(lane).copied()
    }

    /// All recorded lanes.
    #[must_use]
    pub fn cells(&self) -> &[CellType] {
        &self.cells
    }

    /// Fails unless this boundary has one cell per lane of `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::DimensionMismatch`] on disagreement.
    pub fn check_against(&self, grid: &SegmentGrid) -> LevelResult<()> {
        if self.lanes() == grid.lanes() {
            Ok(())
        } else {
            Err(LevelError::DimensionMismatch {
                what: "boundary memory",
                expected: grid.lanes(),
                actual: self.lanes(),
            })
        }
    }

    /// Snapshots the final row of `grid`.
    pub fn record(&mut self, grid: &SegmentGrid) {
        debug_assert_eq!(self.lanes(), grid.lanes());
        let Some(last) = grid.rows().checked_sub(1) else {
            return;
        };
        for (dst, &src) in self.cells.iter_mut().zip(grid.row(last)) {
            *dst = src;
        }
    }
}
