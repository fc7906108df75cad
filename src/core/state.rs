//! Puzzle state: the mutable board and the fixed puzzle layout.
//!
//! ## Board
//!
//! The only mutable state in a session:
//! - The occupancy grid
//! - Every domino, keyed by id
//!
//! The board is mutated exclusively by the placement engine
//! (`crate::engine`), which keeps the two in agreement.
//!
//! ## PuzzleState
//!
//! Everything a renderer needs to draw the puzzle:
//! - The board
//! - Region map and region rules (immutable after load)
//! - Ids of the dominos pre-placed by the puzzle author

use im::HashSet as ImHashSet;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::coord::{Cell, Half};
use super::domino::{Domino, DominoId};
use super::grid::Grid;
use crate::regions::{Region, RegionMap};

/// A broken occupancy invariant found by a full-grid scan.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("grid cell {cell} holds unknown domino {domino}")]
    UnknownOccupant { cell: Cell, domino: DominoId },
    #[error("domino {domino} occupies {found} cells on the grid, expected {expected}")]
    CellCount {
        domino: DominoId,
        found: usize,
        expected: usize,
    },
    #[error("domino {domino} half {half:?} drifted: grid has it at {found}, domino says {expected}")]
    Drift {
        domino: DominoId,
        half: Half,
        found: Cell,
        expected: Cell,
    },
}

/// Grid plus domino collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub(crate) grid: Grid,
    pub(crate) dominos: FxHashMap<DominoId, Domino>,
}

impl Board {
    /// Create an empty board with the given dominos in the tray.
    #[must_use]
    pub fn new(grid: Grid, dominos: impl IntoIterator<Item = Domino>) -> Self {
        Self {
            grid,
            dominos: dominos.into_iter().map(|d| (d.id(), d)).collect(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get a domino by id.
    #[must_use]
    pub fn domino(&self, id: DominoId) -> Option<&Domino> {
        self.dominos.get(&id)
    }

    /// Check if a domino belongs to this puzzle.
    #[must_use]
    pub fn contains(&self, id: DominoId) -> bool {
        self.dominos.contains_key(&id)
    }

    /// Number of dominos in the puzzle.
    #[must_use]
    pub fn domino_count(&self) -> usize {
        self.dominos.len()
    }

    /// Iterate over dominos in home-slot order.
    pub fn dominos(&self) -> impl Iterator<Item = &Domino> {
        let mut all: Vec<&Domino> = self.dominos.values().collect();
        all.sort_by_key(|d| d.home_slot());
        all.into_iter()
    }

    /// Dominos waiting in the tray, in home-slot order.
    pub fn tray(&self) -> impl Iterator<Item = &Domino> {
        self.dominos().filter(|d| !d.is_on_board())
    }

    /// Dominos on the board, in home-slot order.
    pub fn placed(&self) -> impl Iterator<Item = &Domino> {
        self.dominos().filter(|d| d.is_on_board())
    }

    /// Check if every domino is on the board.
    #[must_use]
    pub fn all_placed(&self) -> bool {
        self.dominos.values().all(Domino::is_on_board)
    }

    /// Verify that grid occupancy and domino geometry agree exactly.
    ///
    /// Every domino in the tray owns zero cells; every domino on the board
    /// owns exactly its two cells, each holding the matching half; and
    /// no cell refers to a domino outside this board.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        for (cell, occupant) in self.grid.occupied_cells() {
            if !self.dominos.contains_key(&occupant.domino) {
                return Err(ConsistencyError::UnknownOccupant {
                    cell,
                    domino: occupant.domino,
                });
            }
        }

        for domino in self.dominos.values() {
            let found = self.grid.find_domino_cells(domino.id());
            let expected = if domino.is_on_board() { 2 } else { 0 };
            if found.len() != expected {
                return Err(ConsistencyError::CellCount {
                    domino: domino.id(),
                    found: found.len(),
                    expected,
                });
            }
            if let Some(placement) = domino.placement() {
                for &(cell, half) in &found {
                    let expected = placement.cell(half);
                    if cell != expected {
                        return Err(ConsistencyError::Drift {
                            domino: domino.id(),
                            half,
                            found: cell,
                            expected,
                        });
                    }
                }
                // Two cells of the same half would pass the loop above.
                if found[0].1 == found[1].1 {
                    return Err(ConsistencyError::CellCount {
                        domino: domino.id(),
                        found: 1,
                        expected,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Complete puzzle state as seen by renderers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PuzzleState {
    /// Mutable grid and dominos.
    pub board: Board,

    /// Region lookup per cell.
    pub region_map: RegionMap,

    /// Region rules, indexed by `RegionId`.
    pub regions: Vec<Region>,

    /// Dominos the puzzle places before the player starts.
    pub starting_domino_ids: ImHashSet<DominoId>,
}

impl PuzzleState {
    /// Blocked cells, row-major.
    pub fn blocked(&self) -> impl Iterator<Item = Cell> + '_ {
        self.board.grid.blocked_cells()
    }

    /// Check if a domino was pre-placed by the puzzle.
    #[must_use]
    pub fn is_starting_domino(&self, id: DominoId) -> bool {
        self.starting_domino_ids.contains(&id)
    }

    /// Tray contents in home-slot order.
    pub fn tray(&self) -> impl Iterator<Item = &Domino> {
        self.board.tray()
    }

    /// Dominos on the board, in home-slot order.
    pub fn placed(&self) -> impl Iterator<Item = &Domino> {
        self.board.placed()
    }
}
