//! Undo/redo journal.
//!
//! Two stacks of [`Action`]s. Recording a new action always empties the
//! redo stack. Undo pops the newest action, inverts it through the
//! placement engine and moves it to the redo stack; redo is the mirror.
//!
//! An entry that can no longer be applied is reported without disturbing
//! the rest of the log:
//! - an entry naming a domino the board does not have is dropped
//! - an entry whose placement is refused stays where it was

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::action::Action;
use crate::core::{Board, DominoId};
use crate::engine::PlacementRejected;

/// A history entry that could not be applied.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("history entry refers to unknown domino {0}; entry discarded")]
    MissingDomino(DominoId),
    #[error("cannot apply history entry ({action}): {reason}")]
    InverseRejected {
        action: Action,
        reason: PlacementRejected,
    },
}

/// Which way an entry is being applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Undo,
    Redo,
}

/// Undo and redo stacks.
///
/// ## Example
///
/// ```
/// use pips_engine::core::{Board, Cell, Domino, Grid, Placement, TrayOrientation};
/// use pips_engine::history::{Action, History};
///
/// let domino = Domino::create("23", 0).unwrap();
/// let id = domino.id();
/// let mut board = Board::new(Grid::new(2, 2), [domino]);
/// let at = Placement::new(Cell::new(0, 0), Cell::new(0, 1));
///
/// board.place_or_move(id, at).unwrap();
/// let mut history = History::new();
/// history.record_action(Action::Place { domino: id, at, prev_tray_orientation: TrayOrientation::Deg0 });
///
/// assert_eq!(history.undo(&mut board), Ok(true));
/// assert!(!board.domino(id).unwrap().is_on_board());
/// assert_eq!(history.undo(&mut board), Ok(false)); // nothing left
/// assert_eq!(history.redo(&mut board), Ok(true));
/// assert!(board.domino(id).unwrap().is_on_board());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    undo_stack: Vector<Action>,
    redo_stack: Vector<Action>,
    limit: Option<usize>,
}

impl History {
    /// Create an unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history keeping at most `limit` undo entries.
    #[must_use]
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Push a committed action. Clears the redo stack.
    pub fn record_action(&mut self, action: Action) {
        debug!(%action, "action recorded");
        self.undo_stack.push_back(action);
        self.redo_stack.clear();

        if let Some(limit) = self.limit {
            while self.undo_stack.len() > limit {
                self.undo_stack.pop_front();
            }
        }
    }

    /// Revert the newest action.
    ///
    /// Returns `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self, board: &mut Board) -> Result<bool, HistoryError> {
        self.step(board, Direction::Undo)
    }

    /// Re-apply the newest undone action.
    ///
    /// Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self, board: &mut Board) -> Result<bool, HistoryError> {
        self.step(board, Direction::Redo)
    }

    fn step(&mut self, board: &mut Board, direction: Direction) -> Result<bool, HistoryError> {
        let (from, to) = match direction {
            Direction::Undo => (&mut self.undo_stack, &mut self.redo_stack),
            Direction::Redo => (&mut self.redo_stack, &mut self.undo_stack),
        };

        let Some(action) = from.pop_back() else {
            return Ok(false);
        };

        if !board.contains(action.domino()) {
            warn!(%action, ?direction, "dropping history entry for unknown domino");
            return Err(HistoryError::MissingDomino(action.domino()));
        }

        let applied = match direction {
            Direction::Undo => action.apply_inverse(board),
            Direction::Redo => action.apply_forward(board),
        };

        match applied {
            Ok(()) => {
                debug!(%action, ?direction, "history step applied");
                to.push_back(action);
                Ok(true)
            }
            Err(reason) => {
                warn!(%action, ?direction, %reason, "history step refused");
                from.push_back(action);
                Err(HistoryError::InverseRejected { action, reason })
            }
        }
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undoable actions.
    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redoable actions.
    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Newest undoable action.
    #[must_use]
    pub fn last_action(&self) -> Option<&Action> {
        self.undo_stack.back()
    }

    /// Iterate undoable actions, oldest first.
    pub fn undo_actions(&self) -> impl Iterator<Item = &Action> {
        self.undo_stack.iter()
    }

    /// Iterate redoable actions, oldest first.
    pub fn redo_actions(&self) -> impl Iterator<Item = &Action> {
        self.redo_stack.iter()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, Domino, Grid, Placement, TrayOrientation};

    fn id(name: &str) -> DominoId {
        DominoId::parse(name).unwrap()
    }

    fn at(r0: i32, c0: i32, r1: i32, c1: i32) -> Placement {
        Placement::new(Cell::new(r0, c0), Cell::new(r1, c1))
    }

    fn place(name: &str, p: Placement) -> Action {
        Action::Place {
            domino: id(name),
            at: p,
            prev_tray_orientation: TrayOrientation::Deg0,
        }
    }

    fn board() -> Board {
        Board::new(
            Grid::new(3, 3),
            [Domino::create("01", 0).unwrap(), Domino::create("12", 1).unwrap()],
        )
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new();
        let mut b = board();
        assert_eq!(history.undo(&mut b), Ok(false));
        assert_eq!(history.redo(&mut b), Ok(false));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new();
        let mut b = board();

        b.place_or_move(id("01"), at(0, 0, 0, 1)).unwrap();
        history.record_action(place("01", at(0, 0, 0, 1)));
        history.undo(&mut b).unwrap();
        assert_eq!(history.redo_len(), 1);

        b.place_or_move(id("12"), at(2, 0, 2, 1)).unwrap();
        history.record_action(place("12", at(2, 0, 2, 1)));
        assert_eq!(history.redo_len(), 0);
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(Some(2));
        history.record_action(place("01", at(0, 0, 0, 1)));
        history.record_action(place("12", at(1, 0, 1, 1)));
        history.record_action(place("12", at(2, 0, 2, 1)));

        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.undo_actions().next(), Some(&place("12", at(1, 0, 1, 1))));
    }

    #[test]
    fn test_missing_domino_entry_is_discarded() {
        let mut history = History::new();
        let mut b = board();

        b.place_or_move(id("01"), at(0, 0, 0, 1)).unwrap();
        history.record_action(place("01", at(0, 0, 0, 1)));
        history.record_action(place("66", at(2, 0, 2, 1)));

        assert_eq!(history.undo(&mut b), Err(HistoryError::MissingDomino(id("66"))));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 0);

        // The rest of the log still works.
        assert_eq!(history.undo(&mut b), Ok(true));
        assert!(!b.domino(id("01")).unwrap().is_on_board());
    }

    #[test]
    fn test_refused_entry_stays_on_stack() {
        let mut history = History::new();
        let mut b = board();

        // Record a move whose previous cells are now held by another domino.
        b.place_or_move(id("01"), at(1, 0, 1, 1)).unwrap();
        b.place_or_move(id("12"), at(0, 0, 0, 1)).unwrap();
        history.record_action(Action::Move {
            domino: id("01"),
            at: at(1, 0, 1, 1),
            prev: at(0, 0, 0, 1),
        });
        let before = b.clone();

        let result = history.undo(&mut b);
        assert!(matches!(result, Err(HistoryError::InverseRejected { .. })));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(b, before);
    }
}
