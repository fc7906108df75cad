//! Two-phase rotation: rotate freely, validate on commit.
//!
//! A player may spin a placed domino through several orientations that are
//! individually illegal (off the board, over another piece) on the way to a
//! legal one. Each step only updates the candidate geometry held by a
//! `RotationTxn`; the board keeps the pre-session geometry until
//! [`RotationTxn::commit`] validates the final candidate. A rejected or
//! discarded transaction therefore restores the snapshot exactly: the board
//! never saw the intermediate states.
//!
//! At most one transaction exists per session. Opening one on a different
//! domino requires the caller to finalize the previous one first.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::placement::{PlacementChange, PlacementRejected};
use crate::core::{Board, DominoId, Half, Placement};

/// A live rotation session on one domino.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationTxn {
    domino: DominoId,
    snapshot: Placement,
    candidate: Placement,
    steps: u32,
}

impl RotationTxn {
    /// Open a session, snapshotting the domino's committed geometry.
    pub fn begin(board: &Board, id: DominoId) -> Result<Self, PlacementRejected> {
        let domino = board.domino(id).ok_or(PlacementRejected::UnknownDomino(id))?;
        let snapshot = domino.placement().ok_or(PlacementRejected::NotOnBoard(id))?;

        debug!(domino = %id, at = %snapshot, "rotation session opened");
        Ok(Self {
            domino: id,
            snapshot,
            candidate: snapshot,
            steps: 0,
        })
    }

    #[must_use]
    pub fn domino(&self) -> DominoId {
        self.domino
    }

    /// Geometry before the first rotation of this session.
    #[must_use]
    pub fn snapshot(&self) -> Placement {
        self.snapshot
    }

    /// Geometry after every rotation so far. May be off the board.
    #[must_use]
    pub fn candidate(&self) -> Placement {
        self.candidate
    }

    /// Number of rotation steps applied.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Rotate the candidate 90° clockwise about `pivot`.
    pub fn rotate(&mut self, pivot: Half) -> Placement {
        self.candidate = self.candidate.rotated_clockwise(pivot);
        self.steps += 1;
        self.candidate
    }

    /// Validate the candidate and write it to the board.
    ///
    /// On rejection nothing is written and the domino stays at the
    /// snapshot.
    pub fn commit(self, board: &mut Board) -> Result<PlacementChange, PlacementRejected> {
        debug_assert_eq!(
            board.domino(self.domino).and_then(|d| d.placement()),
            Some(self.snapshot),
            "board moved under an open rotation session"
        );

        let change = PlacementChange {
            domino: self.domino,
            from: Some(self.snapshot),
            to: self.candidate,
        };
        if change.is_noop() {
            debug!(domino = %self.domino, steps = self.steps, "rotation committed unchanged");
            return Ok(change);
        }

        if let Err(reason) = board.validate_target(self.domino, &self.candidate) {
            debug!(
                domino = %self.domino,
                candidate = %self.candidate,
                %reason,
                "rotation rejected, snapshot restored"
            );
            return Err(reason);
        }

        board.commit_geometry(self.domino, self.candidate);
        debug!(domino = %self.domino, to = %self.candidate, "rotation committed");
        Ok(change)
    }

    /// Abandon the session. The board still holds the snapshot.
    pub fn discard(self) -> Placement {
        debug!(domino = %self.domino, steps = self.steps, "rotation session discarded");
        self.snapshot
    }
}

impl Board {
    /// Rotate `id` about `pivot` inside the session held by `txn`.
    ///
    /// The first call opens the session; later calls on the same domino
    /// compose onto the candidate without re-snapshotting. A session open on
    /// another domino must be committed or discarded first.
    pub fn rotate(
        &self,
        txn: &mut Option<RotationTxn>,
        id: DominoId,
        pivot: Half,
    ) -> Result<Placement, PlacementRejected> {
        if let Some(open) = txn.as_ref() {
            if open.domino != id {
                return Err(PlacementRejected::RotationInProgress(open.domino));
            }
        }

        let session = match txn.take() {
            Some(open) => open,
            None => RotationTxn::begin(self, id)?,
        };
        Ok(txn.insert(session).rotate(pivot))
    }

    /// Commit the session in `txn`, leaving `txn` empty either way.
    ///
    /// Returns `Ok(None)` when no session was open.
    pub fn commit_rotation(
        &mut self,
        txn: &mut Option<RotationTxn>,
    ) -> Result<Option<PlacementChange>, PlacementRejected> {
        match txn.take() {
            Some(session) => session.commit(self).map(Some),
            None => Ok(None),
        }
    }
}
