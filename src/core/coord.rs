//! Board coordinates and domino geometry.
//!
//! ## Convention
//!
//! Rows grow downward and columns grow rightward. `Cell { row: 0, col: 0 }`
//! is the top-left corner of the board.
//!
//! Coordinates are signed: a rotation candidate may temporarily point off
//! the board (for example `(0, -1)`) before it is validated on commit.

use serde::{Deserialize, Serialize};

/// A single board position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Create a new cell.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two cells.
    #[must_use]
    pub const fn manhattan(self, other: Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Check if two cells share an edge.
    #[must_use]
    pub const fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }

    /// Offset this cell by `(d_row, d_col)`.
    #[must_use]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// One of a domino's two unit cells.
///
/// Half 0 always carries `pip0` and half 1 always carries `pip1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Half {
    First,
    Second,
}

impl Half {
    /// The opposite half.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Half::First => Half::Second,
            Half::Second => Half::First,
        }
    }

    /// 0 for the first half, 1 for the second.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Half::First => 0,
            Half::Second => 1,
        }
    }
}

/// The board geometry of a placed domino: `cells[0]` holds half 0,
/// `cells[1]` holds half 1.
///
/// A `Placement` is not validated on construction. Adjacency and bounds are
/// checked by the placement engine before anything is written to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub cells: [Cell; 2],
}

impl Placement {
    /// Create a placement from the cells of half 0 and half 1.
    #[must_use]
    pub const fn new(first: Cell, second: Cell) -> Self {
        Self {
            cells: [first, second],
        }
    }

    /// Cell occupied by the given half.
    #[must_use]
    pub const fn cell(&self, half: Half) -> Cell {
        self.cells[half.index()]
    }

    /// Check if the two halves are orthogonal neighbours.
    #[must_use]
    pub const fn is_adjacent(&self) -> bool {
        self.cells[0].is_adjacent(self.cells[1])
    }

    /// Check if the placement covers `cell`.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Rotate the non-pivot half 90° clockwise about the pivot half.
    ///
    /// With `Δ = other - pivot`, the new offset is `Δ' = (Δcol, -Δrow)`:
    /// right becomes down, down becomes left, left becomes up, up becomes
    /// right. The pivot half never moves.
    #[must_use]
    pub const fn rotated_clockwise(&self, pivot: Half) -> Self {
        let p = self.cells[pivot.index()];
        let o = self.cells[pivot.other().index()];
        let (d_row, d_col) = (o.row - p.row, o.col - p.col);
        let swept = p.offset(d_col, -d_row);

        match pivot {
            Half::First => Self::new(p, swept),
            Half::Second => Self::new(swept, p),
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.cells[0], self.cells[1])
    }
}
