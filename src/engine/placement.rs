//! Atomic placement, return-to-tray, and tray rotation.
//!
//! ## Atomicity
//!
//! Every mutating call validates the whole request against the current
//! board before touching anything. Only when validation passes does it
//! clear the domino's old cells, write both new halves, and update the
//! domino's geometry, all inside the same `&mut Board` borrow. A rejected
//! request leaves grid and dominos exactly as they were.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::{Board, Cell, DominoId, Half, Placement, TrayOrientation};

/// Reasons a placement intent is refused. The board is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PlacementRejected {
    #[error("domino {0} is not part of this puzzle")]
    UnknownDomino(DominoId),
    #[error("target {0} lies entirely off the board")]
    OffBoard(Placement),
    #[error("cell {0} is outside the board")]
    OutOfBounds(Cell),
    #[error("target {0} is not two distinct adjacent cells")]
    InvalidCoords(Placement),
    #[error("cell {cell} is blocked")]
    Blocked { cell: Cell },
    #[error("cell {cell} is occupied by domino {by}")]
    Occupied { cell: Cell, by: DominoId },
    #[error("domino {0} is not on the board")]
    NotOnBoard(DominoId),
    #[error("domino {0} is on the board")]
    OnBoard(DominoId),
    #[error("domino {0} is mid-rotation")]
    RotationInProgress(DominoId),
}

/// A committed geometry change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementChange {
    pub domino: DominoId,
    pub from: Option<Placement>,
    pub to: Placement,
}

impl PlacementChange {
    /// Check if the domino ended where it started.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from == Some(self.to)
    }
}

impl Board {
    /// Check a target against bounds, shape, and occupancy for `id`.
    ///
    /// Cells already held by `id` count as free, so moving a domino onto
    /// cells overlapping its own old position is allowed.
    pub fn validate_target(&self, id: DominoId, target: &Placement) -> Result<(), PlacementRejected> {
        if !self.contains(id) {
            return Err(PlacementRejected::UnknownDomino(id));
        }

        let [a, b] = target.cells;
        match (self.grid.is_inside(a), self.grid.is_inside(b)) {
            (false, false) => return Err(PlacementRejected::OffBoard(*target)),
            (false, true) => return Err(PlacementRejected::OutOfBounds(a)),
            (true, false) => return Err(PlacementRejected::OutOfBounds(b)),
            (true, true) => {}
        }

        if !target.is_adjacent() {
            return Err(PlacementRejected::InvalidCoords(*target));
        }

        for cell in target.cells {
            if self.grid.is_blocked(cell) {
                return Err(PlacementRejected::Blocked { cell });
            }
            if let Some(occupant) = self.grid.get_cell(cell) {
                if occupant.domino != id {
                    return Err(PlacementRejected::Occupied {
                        cell,
                        by: occupant.domino,
                    });
                }
            }
        }

        Ok(())
    }

    /// Place a domino from the tray, or move it on the board.
    ///
    /// Half 0 lands on `target.cells[0]` and half 1 on `target.cells[1]`.
    /// Re-submitting the domino's current cells succeeds without changes.
    pub fn place_or_move(
        &mut self,
        id: DominoId,
        target: Placement,
    ) -> Result<PlacementChange, PlacementRejected> {
        if let Err(reason) = self.validate_target(id, &target) {
            debug!(domino = %id, target = %target, %reason, "placement rejected");
            return Err(reason);
        }

        let from = self.dominos.get(&id).and_then(|d| d.placement());
        let change = PlacementChange { domino: id, from, to: target };
        if change.is_noop() {
            return Ok(change);
        }

        self.commit_geometry(id, target);
        debug!(domino = %id, to = %target, "placement committed");
        Ok(change)
    }

    /// Convenience form of [`Board::place_or_move`] taking the two cells.
    pub fn place_or_move_cells(
        &mut self,
        id: DominoId,
        half0: Cell,
        half1: Cell,
    ) -> Result<PlacementChange, PlacementRejected> {
        self.place_or_move(id, Placement::new(half0, half1))
    }

    /// Clear-then-write for an already validated target.
    pub(crate) fn commit_geometry(&mut self, id: DominoId, target: Placement) {
        self.grid.clear_domino(id);
        self.grid.write_domino(id, &target);
        if let Some(domino) = self.dominos.get_mut(&id) {
            domino.set_placement(Some(target));
        }
    }

    /// Send a domino back to the tray.
    ///
    /// Clears its cells, forgets its geometry and resets its tray
    /// orientation to 0°, whatever its previous state. Returns the
    /// geometry it had on the board, if any.
    pub fn remove_to_tray(&mut self, id: DominoId) -> Result<Option<Placement>, PlacementRejected> {
        let domino = self
            .dominos
            .get_mut(&id)
            .ok_or(PlacementRejected::UnknownDomino(id))?;

        let previous = domino.placement();
        domino.set_placement(None);
        domino.set_tray_orientation(TrayOrientation::Deg0);
        self.grid.clear_domino(id);

        if let Some(from) = previous {
            debug!(domino = %id, from = %from, "returned to tray");
        }
        Ok(previous)
    }

    /// Rotate a tray domino's cosmetic orientation by 90°.
    ///
    /// Only legal while the domino is in the tray.
    pub fn rotate_in_tray(&mut self, id: DominoId) -> Result<TrayOrientation, PlacementRejected> {
        let domino = self
            .dominos
            .get_mut(&id)
            .ok_or(PlacementRejected::UnknownDomino(id))?;
        if domino.is_on_board() {
            return Err(PlacementRejected::OnBoard(id));
        }

        let next = domino.tray_orientation().rotated_clockwise();
        domino.set_tray_orientation(next);
        Ok(next)
    }

    /// Restore a tray orientation without touching geometry.
    pub(crate) fn restore_tray_orientation(&mut self, id: DominoId, orientation: TrayOrientation) {
        if let Some(domino) = self.dominos.get_mut(&id) {
            domino.set_tray_orientation(orientation);
        }
    }

    /// Cell currently holding `half` of `id`, if placed.
    #[must_use]
    pub fn half_cell(&self, id: DominoId, half: Half) -> Option<Cell> {
        self.domino(id)?.placement().map(|p| p.cell(half))
    }
}
