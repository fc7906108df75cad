//! Puzzle session: the object a front end talks to.
//!
//! A session owns one loaded puzzle and processes one intent at a time:
//! place or move, rotate steps and their commit, return to tray, tray
//! rotation, undo/redo and the explicit solution check. There is no
//! process-wide state; two sessions never share anything.
//!
//! ## Usage
//!
//! ```
//! use pips_engine::core::{Cell, DominoId, Half};
//! use pips_engine::session::PuzzleSession;
//!
//! let json = r#"{ "width": 2, "height": 2, "dominos": ["05", "23"],
//!     "regions": [{ "id": "col0", "rule": "2", "cells": [{"row":0,"col":0},{"row":1,"col":0}] }] }"#;
//! let mut session = PuzzleSession::from_json(json).unwrap();
//! let id: DominoId = "23".parse().unwrap();
//!
//! session.place(id, Cell::new(0, 0), Cell::new(0, 1)).unwrap();
//! session.rotate(id, Half::First).unwrap();
//! session.commit_rotation().unwrap();
//! assert_eq!(session.board().grid().get_cell(Cell::new(1, 0)).unwrap().domino, id);
//!
//! assert!(session.undo().unwrap());
//! assert_eq!(session.board().grid().get_cell(Cell::new(1, 0)), None);
//! ```

mod puzzle_session;

pub use puzzle_session::{PuzzleSession, SolutionReport};
