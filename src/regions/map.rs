//! Region map: a dense per-cell region lookup built once at load.
//!
//! Region definitions are either explicit cell lists or axis-aligned
//! rectangles. The builder drops cells outside the board and, if two
//! regions claim the same cell, lets the later one win. Rejecting overlap
//! is the structural validator's job, not the builder's.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::core::Cell;

/// Region identifier: the region's index in load order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub u16);

impl RegionId {
    /// Most regions a single puzzle can hold.
    pub const LIMIT: usize = u16::MAX as usize + 1;

    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Id for the region at `index` in load order, `None` past `LIMIT`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u16::try_from(index).ok().map(Self)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Region({})", self.0)
    }
}

/// Axis-aligned rectangle of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(top: i32, left: i32, width: i32, height: i32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Number of declared cells. Zero for non-positive sizes.
    #[must_use]
    pub fn area(&self) -> u64 {
        let side = |len: i32| u64::try_from(len).unwrap_or(0);
        side(self.width) * side(self.height)
    }

    /// Cells inside a `rows` × `cols` board, row-major.
    ///
    /// The rectangle is intersected with the board before iterating, so the
    /// cost is bounded by the board whatever the declared size.
    pub fn cells_within(&self, rows: usize, cols: usize) -> impl Iterator<Item = Cell> {
        let rows = clamp_span(self.top, self.height, rows);
        let cols = clamp_span(self.left, self.width, cols);
        rows.flat_map(move |row| cols.clone().map(move |col| Cell::new(row, col)))
    }
}

/// `start..start + len` intersected with `0..limit`, in `i64` so no sum overflows.
fn clamp_span(start: i32, len: i32, limit: usize) -> Range<i32> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX).min(i64::from(i32::MAX));
    let lo = i64::from(start).clamp(0, limit);
    let hi = (i64::from(start) + i64::from(len.max(0))).clamp(lo, limit);
    // Both ends lie in 0..=i32::MAX.
    (lo as i32)..(hi as i32)
}

fn inside(cell: Cell, rows: usize, cols: usize) -> bool {
    usize::try_from(cell.row).is_ok_and(|row| row < rows)
        && usize::try_from(cell.col).is_ok_and(|col| col < cols)
}

/// Region shape as declared by the puzzle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionShape {
    Cells(Vec<Cell>),
    Rectangle(Rect),
}

impl RegionShape {
    /// Number of declared cells, counting any outside the board.
    #[must_use]
    pub fn declared_len(&self) -> u64 {
        match self {
            RegionShape::Cells(cells) => cells.len() as u64,
            RegionShape::Rectangle(rect) => rect.area(),
        }
    }

    /// Declared cells that lie on a `rows` × `cols` board.
    #[must_use]
    pub fn cells_within(&self, rows: usize, cols: usize) -> Vec<Cell> {
        match self {
            RegionShape::Cells(cells) => cells
                .iter()
                .copied()
                .filter(|&cell| inside(cell, rows, cols))
                .collect(),
            RegionShape::Rectangle(rect) => rect.cells_within(rows, cols).collect(),
        }
    }
}

/// Rows × cols array of region ids; `None` is the "no region" sentinel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMap {
    rows: usize,
    cols: usize,
    cells: Vec<Option<RegionId>>,
}

impl RegionMap {
    /// Build a map from shapes listed in region-id order.
    ///
    /// Shapes past `RegionId::LIMIT` have no id and are ignored.
    #[must_use]
    pub fn build(rows: usize, cols: usize, shapes: &[RegionShape]) -> Self {
        let mut builder = RegionMapBuilder::new(rows, cols);
        for (id, shape) in (0..=u16::MAX).map(RegionId).zip(shapes) {
            builder.add(id, shape);
        }
        builder.build()
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
        inside(cell, self.rows, self.cols)
            .then(|| cell.row as usize * self.cols + cell.col as usize)
    }

    /// Region owning a cell, `None` if unassigned or off the board.
    #[must_use]
    pub fn region_at(&self, cell: Cell) -> Option<RegionId> {
        self.index(cell).and_then(|i| self.cells[i])
    }

    /// Cells mapped to `region`, row-major.
    pub fn cells_of(&self, region: RegionId) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, slot)| **slot == Some(region))
            .map(move |(i, _)| Cell::new((i / cols) as i32, (i % cols) as i32))
    }
}

/// Incremental region map construction.
///
/// ```
/// use pips_engine::core::Cell;
/// use pips_engine::regions::{Rect, RegionId, RegionMapBuilder, RegionShape};
///
/// let mut builder = RegionMapBuilder::new(2, 2);
/// let kept = builder.add(
///     RegionId::new(0),
///     &RegionShape::Cells(vec![Cell::new(0, 0), Cell::new(5, 5)]),
/// );
/// assert_eq!(kept, vec![Cell::new(0, 0)]); // (5,5) is off the board
///
/// builder.add(RegionId::new(1), &RegionShape::Rectangle(Rect::new(1, 0, 2, 1)));
/// let map = builder.build();
/// assert_eq!(map.region_at(Cell::new(1, 1)), Some(RegionId::new(1)));
/// assert_eq!(map.region_at(Cell::new(0, 1)), None);
/// ```
#[derive(Clone, Debug)]
pub struct RegionMapBuilder {
    map: RegionMap,
    dropped: u64,
}

impl RegionMapBuilder {
    /// Start with every cell unassigned.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            map: RegionMap {
                rows,
                cols,
                cells: vec![None; rows * cols],
            },
            dropped: 0,
        }
    }

    /// Assign a shape's cells to `region`.
    ///
    /// Returns the in-bounds cells that were written. Cells already held by
    /// another region are overwritten.
    pub fn add(&mut self, region: RegionId, shape: &RegionShape) -> Vec<Cell> {
        let within = shape.cells_within(self.map.rows, self.map.cols);
        self.dropped = self
            .dropped
            .saturating_add(shape.declared_len() - within.len() as u64);

        let mut kept = Vec::with_capacity(within.len());
        for cell in within {
            if let Some(i) = self.map.index(cell) {
                self.map.cells[i] = Some(region);
                if !kept.contains(&cell) {
                    kept.push(cell);
                }
            }
        }
        kept
    }

    /// Number of declared cells discarded for lying off the board.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    #[must_use]
    pub fn build(self) -> RegionMap {
        self.map
    }
}
