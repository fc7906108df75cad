//! Puzzle session implementation.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{
    Board, Cell, ConsistencyError, DominoId, Half, Placement, PuzzleState, SessionConfig,
    TrayOrientation,
};
use crate::engine::{PlacementChange, PlacementRejected, RotationTxn};
use crate::history::{Action, History, HistoryError};
use crate::puzzle::{LoadError, PuzzleDefinition, PuzzleLoader};
use crate::regions::{RegionEvaluator, RegionReport};

/// Result of an explicit "check solution" request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionReport {
    /// One report per region, in region order.
    pub regions: Vec<RegionReport>,
    /// Every domino is on the board.
    pub all_placed: bool,
    /// Every domino placed and every region satisfied.
    pub solved: bool,
}

impl SolutionReport {
    /// Regions whose rule does not hold.
    pub fn unsatisfied(&self) -> impl Iterator<Item = &RegionReport> {
        self.regions.iter().filter(|r| !r.satisfied)
    }
}

/// One player's puzzle in progress.
///
/// Owns the state, the undo history and at most one live rotation. All
/// intents go through here; rejected intents leave everything unchanged.
///
/// A live rotation ends in one of three ways: `commit_rotation`, a
/// rotation started on another domino (commit, reverting on rejection),
/// or any other intent, which abandons it and keeps the pre-rotation
/// geometry.
#[derive(Clone, Debug)]
pub struct PuzzleSession {
    state: PuzzleState,
    history: History,
    rotation: Option<RotationTxn>,
    config: SessionConfig,
}

impl PuzzleSession {
    /// Wrap an already loaded state.
    #[must_use]
    pub fn new(state: PuzzleState, config: SessionConfig) -> Self {
        Self {
            history: History::with_limit(config.history_limit),
            state,
            rotation: None,
            config,
        }
    }

    /// Load `def` with the default configuration.
    pub fn from_definition(def: &PuzzleDefinition) -> Result<Self, LoadError> {
        Self::load(def, SessionConfig::default())
    }

    /// Load `def` with `config`.
    pub fn load(def: &PuzzleDefinition, config: SessionConfig) -> Result<Self, LoadError> {
        let state = PuzzleLoader::new(config.clone()).load(def)?;
        Ok(Self::new(state, config))
    }

    /// Parse and load a JSON definition with the default configuration.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let def = PuzzleDefinition::from_json(json)?;
        Self::from_definition(&def)
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The live rotation, if any.
    #[must_use]
    pub fn pending_rotation(&self) -> Option<&RotationTxn> {
        self.rotation.as_ref()
    }

    /// Geometry to draw for `id`: the rotation candidate while one is
    /// live on it, otherwise the committed placement.
    #[must_use]
    pub fn displayed_placement(&self, id: DominoId) -> Option<Placement> {
        match &self.rotation {
            Some(txn) if txn.domino() == id => Some(txn.candidate()),
            _ => self.state.board.domino(id)?.placement(),
        }
    }

    /// Give up the session and keep the state.
    #[must_use]
    pub fn into_state(self) -> PuzzleState {
        self.state
    }

    // === Intents ===

    /// Place a tray domino or move a placed one.
    ///
    /// Half 0 lands on `half0`, half 1 on `half1`. Dropping a domino on its
    /// own cells succeeds without recording anything.
    pub fn place(
        &mut self,
        id: DominoId,
        half0: Cell,
        half1: Cell,
    ) -> Result<PlacementChange, PlacementRejected> {
        self.abandon_rotation();

        let prev_tray_orientation = self.tray_orientation(id)?;
        let change = self.state.board.place_or_move_cells(id, half0, half1)?;

        match change.from {
            _ if change.is_noop() => {}
            None => self.history.record_action(Action::Place {
                domino: id,
                at: change.to,
                prev_tray_orientation,
            }),
            Some(prev) => self.history.record_action(Action::Move {
                domino: id,
                at: change.to,
                prev,
            }),
        }
        Ok(change)
    }

    /// Rotate a placed domino 90° clockwise about `pivot`.
    ///
    /// Only the pending candidate changes. A rotation live on another
    /// domino is finalized first.
    pub fn rotate(&mut self, id: DominoId, pivot: Half) -> Result<Placement, PlacementRejected> {
        if self.rotation.as_ref().is_some_and(|txn| txn.domino() != id) {
            self.finalize_rotation();
        }
        self.state.board.rotate(&mut self.rotation, id, pivot)
    }

    /// Validate and apply the live rotation.
    ///
    /// Returns `Ok(None)` when no rotation is live. On rejection the
    /// domino keeps its pre-rotation geometry.
    pub fn commit_rotation(&mut self) -> Result<Option<PlacementChange>, PlacementRejected> {
        let change = self.state.board.commit_rotation(&mut self.rotation)?;

        if let Some(PlacementChange {
            domino,
            from: Some(prev),
            to,
        }) = change
        {
            if prev != to {
                self.history.record_action(Action::Rotate {
                    domino,
                    prev,
                    next: to,
                });
            }
        }
        Ok(change)
    }

    /// Drop the live rotation, keeping the pre-rotation geometry.
    pub fn cancel_rotation(&mut self) -> Option<Placement> {
        self.rotation.take().map(RotationTxn::discard)
    }

    /// Send a domino back to the tray.
    ///
    /// Returns the geometry it left. A domino already in the tray only
    /// has its orientation reset and nothing is recorded.
    pub fn return_to_tray(&mut self, id: DominoId) -> Result<Option<Placement>, PlacementRejected> {
        self.abandon_rotation();

        let prev_tray_orientation = self.tray_orientation(id)?;
        let prev = self.state.board.remove_to_tray(id)?;
        if let Some(prev) = prev {
            self.history.record_action(Action::Return {
                domino: id,
                prev,
                prev_tray_orientation,
            });
        }
        Ok(prev)
    }

    /// Spin a tray domino by 90°. Cosmetic and not recorded.
    pub fn rotate_in_tray(&mut self, id: DominoId) -> Result<TrayOrientation, PlacementRejected> {
        self.abandon_rotation();
        self.state.board.rotate_in_tray(id)
    }

    /// Undo the newest action. `Ok(false)` when there is none.
    pub fn undo(&mut self) -> Result<bool, HistoryError> {
        self.abandon_rotation();
        self.history.undo(&mut self.state.board)
    }

    /// Redo the newest undone action. `Ok(false)` when there is none.
    pub fn redo(&mut self) -> Result<bool, HistoryError> {
        self.abandon_rotation();
        self.history.redo(&mut self.state.board)
    }

    // === Queries ===

    /// Evaluate every region against the committed board.
    #[must_use]
    pub fn check_solution(&self) -> SolutionReport {
        let board = &self.state.board;
        let regions = RegionEvaluator::evaluate_all_regions(
            board.grid(),
            &self.state.region_map,
            &self.state.regions,
        );
        let all_placed = board.all_placed();
        let solved = all_placed && regions.iter().all(|r| r.satisfied);

        if solved {
            info!(regions = regions.len(), "puzzle solved");
        }
        SolutionReport {
            regions,
            all_placed,
            solved,
        }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.check_solution().solved
    }

    /// Full-grid scan of the occupancy invariant.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        self.state.board.check_consistency()
    }

    // === Internal ===

    fn tray_orientation(&self, id: DominoId) -> Result<TrayOrientation, PlacementRejected> {
        self.state
            .board
            .domino(id)
            .map(|d| d.tray_orientation())
            .ok_or(PlacementRejected::UnknownDomino(id))
    }

    /// Commit the live rotation, reverting it if the commit is refused.
    fn finalize_rotation(&mut self) {
        if self.rotation.is_none() {
            return;
        }
        if let Err(reason) = self.commit_rotation() {
            debug!(%reason, "live rotation reverted before next intent");
        }
    }

    /// Drop the live rotation without committing it.
    fn abandon_rotation(&mut self) {
        if let Some(txn) = self.rotation.take() {
            txn.discard();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str = r#"{
        "width": 2, "height": 2,
        "dominos": ["01", "23"],
        "regions": [
            { "id": "top", "rule": "1", "cells": [{"row":0,"col":0},{"row":0,"col":1}] },
            { "id": "bottom", "rule": ">4", "rectangle": {"top":1,"left":0,"width":2,"height":1} }
        ]
    }"#;

    fn id(name: &str) -> DominoId {
        DominoId::parse(name).unwrap()
    }

    #[test]
    fn test_place_records_place_then_move() {
        let mut session = PuzzleSession::from_json(PUZZLE).unwrap();

        session.place(id("01"), Cell::new(0, 0), Cell::new(0, 1)).unwrap();
        session.place(id("01"), Cell::new(1, 0), Cell::new(1, 1)).unwrap();
        // Same cells again: no entry.
        session.place(id("01"), Cell::new(1, 0), Cell::new(1, 1)).unwrap();

        let kinds: Vec<_> = session.history().undo_actions().map(Action::kind).collect();
        assert_eq!(kinds, ["place", "move"]);
    }

    #[test]
    fn test_solve() {
        let mut session = PuzzleSession::from_json(PUZZLE).unwrap();
        assert!(!session.is_solved());

        session.place(id("01"), Cell::new(0, 0), Cell::new(0, 1)).unwrap();
        session.place(id("23"), Cell::new(1, 0), Cell::new(1, 1)).unwrap();

        let report = session.check_solution();
        assert!(report.all_placed);
        assert!(report.solved);
        assert_eq!(report.regions[1].current_value, 5);
        assert_eq!(report.unsatisfied().count(), 0);
    }

    #[test]
    fn test_rotation_on_other_domino_finalizes_first() {
        let mut session = PuzzleSession::from_json(PUZZLE).unwrap();
        session.place(id("01"), Cell::new(0, 0), Cell::new(0, 1)).unwrap();
        session.place(id("23"), Cell::new(1, 0), Cell::new(1, 1)).unwrap();

        // 01 pivoting on (0,0) would land on (1,0), held by 23.
        session.rotate(id("01"), Half::First).unwrap();
        assert_eq!(
            session.displayed_placement(id("01")),
            Some(Placement::new(Cell::new(0, 0), Cell::new(1, 0)))
        );

        session.rotate(id("23"), Half::First).unwrap();
        assert_eq!(session.pending_rotation().map(RotationTxn::domino), Some(id("23")));
        assert_eq!(
            session.board().domino(id("01")).unwrap().placement(),
            Some(Placement::new(Cell::new(0, 0), Cell::new(0, 1)))
        );
        assert_eq!(session.check_consistency(), Ok(()));
    }

    #[test]
    fn test_return_to_tray_from_tray_records_nothing() {
        let mut session = PuzzleSession::from_json(PUZZLE).unwrap();
        session.rotate_in_tray(id("01")).unwrap();

        assert_eq!(session.return_to_tray(id("01")), Ok(None));
        assert!(!session.history().can_undo());
        assert_eq!(
            session.board().domino(id("01")).unwrap().tray_orientation(),
            TrayOrientation::Deg0
        );
    }
}
