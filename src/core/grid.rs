//! Occupancy grid.
//!
//! The `Grid` records which domino half sits in each cell and which cells
//! are blocked. All queries are total: out-of-bounds lookups answer `None`
//! or `false` rather than panicking.
//!
//! The grid has no opinion about dominos. Writes go through the placement
//! engine, which keeps grid occupancy and domino geometry in lockstep.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::coord::{Cell, Half, Placement};
use super::domino::DominoId;

/// What sits in an occupied cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occupant {
    pub domino: DominoId,
    pub half: Half,
}

impl Occupant {
    #[must_use]
    pub const fn new(domino: DominoId, half: Half) -> Self {
        Self { domino, half }
    }

    /// Pip value this occupant contributes to its cell.
    #[must_use]
    pub const fn pip(&self) -> u8 {
        self.domino.pip(self.half)
    }
}

/// Rows × cols occupancy array with a blocked-cell mask.
///
/// ## Usage
///
/// ```
/// use pips_engine::core::{Cell, Grid};
///
/// let mut grid = Grid::new(3, 2);
/// grid.block(Cell::new(1, 1));
///
/// assert!(grid.is_inside(Cell::new(2, 1)));
/// assert!(!grid.is_inside(Cell::new(0, 2)));
/// assert!(!grid.is_cell_free(Cell::new(1, 1)));
/// assert_eq!(grid.playable_cell_count(), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Occupant>>,
    blocked: Vec<bool>,
}

impl Grid {
    /// Create an empty grid.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            blocked: vec![false; rows * cols],
        }
    }

    /// Create a grid from width (columns) and height (rows).
    #[must_use]
    pub fn create(width: usize, height: usize) -> Self {
        Self::new(height, width)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if self.is_inside(cell) {
            Some(cell.row as usize * self.cols + cell.col as usize)
        } else {
            None
        }
    }

    /// Check if a cell lies on the board.
    #[must_use]
    pub fn is_inside(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows
            && (cell.col as usize) < self.cols
    }

    /// Occupant of a cell, `None` if empty or outside the board.
    #[must_use]
    pub fn get_cell(&self, cell: Cell) -> Option<Occupant> {
        self.index(cell).and_then(|i| self.cells[i])
    }

    /// Check if a cell is blocked. Outside cells are not blocked.
    #[must_use]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| self.blocked[i])
    }

    /// Check if a cell is on the board, not blocked, and unoccupied.
    #[must_use]
    pub fn is_cell_free(&self, cell: Cell) -> bool {
        self.index(cell)
            .is_some_and(|i| !self.blocked[i] && self.cells[i].is_none())
    }

    /// Check if a cell is free or already held by `domino`.
    #[must_use]
    pub fn is_free_or_owned_by(&self, cell: Cell, domino: DominoId) -> bool {
        match self.index(cell) {
            Some(i) if !self.blocked[i] => match self.cells[i] {
                None => true,
                Some(occupant) => occupant.domino == domino,
            },
            _ => false,
        }
    }

    /// Check if two cells share an edge.
    #[must_use]
    pub fn are_adjacent(a: Cell, b: Cell) -> bool {
        a.is_adjacent(b)
    }

    /// Check if a domino could be dropped on `placement` of an otherwise
    /// untouched board: both cells inside, adjacent, and free.
    #[must_use]
    pub fn can_place_domino(&self, placement: &Placement) -> bool {
        placement.is_adjacent() && placement.cells.iter().all(|&c| self.is_cell_free(c))
    }

    /// Scan the whole grid for cells held by `domino`.
    ///
    /// A consistent board yields zero or two cells, ordered by half.
    #[must_use]
    pub fn find_domino_cells(&self, domino: DominoId) -> SmallVec<[(Cell, Half); 2]> {
        let mut found: SmallVec<[(Cell, Half); 2]> = self
            .occupied_cells()
            .filter(|(_, occupant)| occupant.domino == domino)
            .map(|(cell, occupant)| (cell, occupant.half))
            .collect();
        found.sort_by_key(|(_, half)| half.index());
        found
    }

    /// Iterate over every occupied cell in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Cell, Occupant)> + '_ {
        let cols = self.cols;
        self.cells.iter().enumerate().filter_map(move |(i, slot)| {
            slot.map(|occupant| (Cell::new((i / cols) as i32, (i % cols) as i32), occupant))
        })
    }

    /// Iterate over blocked cells in row-major order.
    pub fn blocked_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols;
        self.blocked
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(move |(i, _)| Cell::new((i / cols) as i32, (i % cols) as i32))
    }

    /// Cells that can ever hold a domino half.
    #[must_use]
    pub fn playable_cell_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| !b).count()
    }

    /// Playable cells not currently covered.
    #[must_use]
    pub fn free_cell_count(&self) -> usize {
        self.cells
            .iter()
            .zip(&self.blocked)
            .filter(|(slot, b)| slot.is_none() && !**b)
            .count()
    }

    /// Mark a cell as blocked. Returns false for cells off the board.
    pub fn block(&mut self, cell: Cell) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.blocked[i] = true;
                true
            }
            None => false,
        }
    }

    /// Remove every cell held by `domino`. Returns how many were cleared.
    pub(crate) fn clear_domino(&mut self, domino: DominoId) -> usize {
        let mut cleared = 0;
        for slot in &mut self.cells {
            if slot.is_some_and(|o| o.domino == domino) {
                *slot = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// Write both halves of `domino` at `placement`.
    ///
    /// Callers must have validated the placement; cells outside the board
    /// are skipped rather than written.
    pub(crate) fn write_domino(&mut self, domino: DominoId, placement: &Placement) {
        for half in [Half::First, Half::Second] {
            if let Some(i) = self.index(placement.cell(half)) {
                self.cells[i] = Some(Occupant::new(domino, half));
            }
        }
    }
}
