//! History entries.
//!
//! Each action stores the complete geometry on both sides of the change,
//! so it can be inverted or replayed from the entry alone, without
//! consulting the rest of the log.
//!
//! ## Example
//!
//! ```
//! use pips_engine::core::{Cell, DominoId, Placement, TrayOrientation};
//! use pips_engine::history::Action;
//!
//! let id: DominoId = "23".parse().unwrap();
//! let at = Placement::new(Cell::new(0, 0), Cell::new(0, 1));
//!
//! let place = Action::Place { domino: id, at, prev_tray_orientation: TrayOrientation::Deg0 };
//! assert_eq!(place.domino(), id);
//! assert_eq!(place.kind(), "place");
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{Board, DominoId, Placement, TrayOrientation};
use crate::engine::PlacementRejected;

/// A committed user action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Tray → board.
    Place {
        domino: DominoId,
        at: Placement,
        prev_tray_orientation: TrayOrientation,
    },
    /// Board → board by drag.
    Move {
        domino: DominoId,
        at: Placement,
        prev: Placement,
    },
    /// Board → board by a committed rotation session.
    Rotate {
        domino: DominoId,
        prev: Placement,
        next: Placement,
    },
    /// Board → tray.
    Return {
        domino: DominoId,
        prev: Placement,
        prev_tray_orientation: TrayOrientation,
    },
}

impl Action {
    /// The domino this action moved.
    #[must_use]
    pub fn domino(&self) -> DominoId {
        match *self {
            Action::Place { domino, .. }
            | Action::Move { domino, .. }
            | Action::Rotate { domino, .. }
            | Action::Return { domino, .. } => domino,
        }
    }

    /// Short name of the variant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Place { .. } => "place",
            Action::Move { .. } => "move",
            Action::Rotate { .. } => "rotate",
            Action::Return { .. } => "return",
        }
    }

    /// Geometry after the action, `None` when it ends in the tray.
    #[must_use]
    pub fn after(&self) -> Option<Placement> {
        match *self {
            Action::Place { at, .. } | Action::Move { at, .. } => Some(at),
            Action::Rotate { next, .. } => Some(next),
            Action::Return { .. } => None,
        }
    }

    /// Geometry before the action, `None` when it started in the tray.
    #[must_use]
    pub fn before(&self) -> Option<Placement> {
        match *self {
            Action::Place { .. } => None,
            Action::Move { prev, .. }
            | Action::Rotate { prev, .. }
            | Action::Return { prev, .. } => Some(prev),
        }
    }

    /// Undo this action on `board` using the placement engine.
    pub fn apply_inverse(&self, board: &mut Board) -> Result<(), PlacementRejected> {
        match *self {
            Action::Place {
                domino,
                prev_tray_orientation,
                ..
            } => {
                board.remove_to_tray(domino)?;
                board.restore_tray_orientation(domino, prev_tray_orientation);
            }
            Action::Move { domino, prev, .. } | Action::Rotate { domino, prev, .. } => {
                board.place_or_move(domino, prev)?;
            }
            Action::Return {
                domino,
                prev,
                prev_tray_orientation,
            } => {
                board.place_or_move(domino, prev)?;
                board.restore_tray_orientation(domino, prev_tray_orientation);
            }
        }
        Ok(())
    }

    /// Replay this action on `board` using the placement engine.
    pub fn apply_forward(&self, board: &mut Board) -> Result<(), PlacementRejected> {
        match *self {
            Action::Place { domino, at, .. } | Action::Move { domino, at, .. } => {
                board.place_or_move(domino, at)?;
            }
            Action::Rotate { domino, next, .. } => {
                board.place_or_move(domino, next)?;
            }
            Action::Return { domino, .. } => {
                board.remove_to_tray(domino)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Place { domino, at, .. } => write!(f, "place {} at {}", domino, at),
            Action::Move { domino, at, prev } => write!(f, "move {} {} -> {}", domino, prev, at),
            Action::Rotate { domino, prev, next } => {
                write!(f, "rotate {} {} -> {}", domino, prev, next)
            }
            Action::Return { domino, prev, .. } => write!(f, "return {} from {}", domino, prev),
        }
    }
}
