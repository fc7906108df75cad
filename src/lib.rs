//! # pips-engine
//!
//! State engine for domino-on-grid logic puzzles: place every domino from
//! the tray onto the board so that each region's pip sum meets its rule.
//!
//! ## Design Principles
//!
//! 1. **Atomic Mutation**: Every change to domino geometry and grid
//!    occupancy commits completely or not at all. A rejected intent leaves
//!    the board exactly as it was.
//!
//! 2. **Validate Once**: Puzzle definitions are checked structurally before
//!    any engine object exists. Downstream code trusts the loaded state.
//!
//! 3. **Explicit Sessions**: All mutable state lives in a `PuzzleSession`
//!    owned by the caller. No globals.
//!
//! ## Architecture
//!
//! - **One Identifier Type**: `DominoId` is parsed once at the loader
//!   boundary and used everywhere after.
//!
//! - **Two-Phase Rotation**: Rotation steps update a pending `RotationTxn`;
//!   the board only changes when the final orientation is committed.
//!
//! - **Self-Contained History**: Each recorded action carries the full
//!   geometry on both sides, so undo and redo need only the entry itself.
//!
//! ## Modules
//!
//! - `core`: Cells, dominos, grid, board state, configuration
//! - `regions`: Region map, rules, rule evaluation
//! - `engine`: Placement and rotation, the only board mutators
//! - `history`: Undo/redo log
//! - `puzzle`: Definition format, structural validation, loading
//! - `session`: Intent-level API tying it all together

pub mod core;
pub mod engine;
pub mod history;
pub mod puzzle;
pub mod regions;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Board, Cell, ConsistencyError, Domino, DominoId, DominoIdError, Grid, Half, Occupant,
    Placement, PuzzleState, RegionOverlap, SessionConfig, TrayOrientation,
};

pub use crate::regions::{
    Comparator, Rect, Region, RegionEvaluator, RegionId, RegionMap, RegionMapBuilder,
    RegionReport, RegionShape, Rule, RuleParseError, RuleSpec,
};

pub use crate::engine::{PlacementChange, PlacementRejected, RotationTxn};

pub use crate::history::{Action, History, HistoryError};

pub use crate::puzzle::{
    LoadError, PuzzleDefinition, PuzzleLoader, StructuralError, StructuralErrorCode,
    StructuralValidator, ValidationReport, ValidationStatus,
};

pub use crate::session::{PuzzleSession, SolutionReport};
