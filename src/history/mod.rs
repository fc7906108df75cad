//! Undo/redo history built on the placement engine.
//!
//! ## Key Types
//!
//! - `Action`: Tagged record of one committed change (place, move, rotate, return)
//! - `History`: Undo and redo stacks
//! - `HistoryError`: An entry that could not be applied

pub mod action;
pub mod log;

pub use action::Action;
pub use log::{History, HistoryError};
