//! Region definitions.
//!
//! A `Region` is fixed at load: its id, the author's label, its compiled
//! rule, and the in-bounds cells it declared.

use serde::{Deserialize, Serialize};

use super::map::RegionId;
use super::rule::Rule;
use crate::core::Cell;

/// A set of cells bound to a constraint on their pip sum.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Index in load order.
    pub id: RegionId,

    /// Identifier used by the puzzle file (for display/debugging).
    pub label: String,

    /// Constraint on the sum of covered pips.
    pub rule: Rule,

    /// Declared cells that lie on the board.
    pub cells: Vec<Cell>,
}

impl Region {
    /// Create a new region.
    pub fn new(id: RegionId, label: impl Into<String>, rule: Rule, cells: Vec<Cell>) -> Self {
        Self {
            id,
            label: label.into(),
            rule,
            cells,
        }
    }

    /// Number of cells in the region.
    #[must_use]
    pub fn size(&self) -> usize {
        self.cells.len()
    }
}
