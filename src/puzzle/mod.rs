//! Puzzle definitions and loading.
//!
//! ## Key Types
//!
//! - `PuzzleDefinition`: Serde model of a puzzle file
//! - `StructuralValidator`: Whole-definition checks with stable error codes
//! - `PuzzleLoader`: Validates, then builds the initial `PuzzleState`
//!
//! ## Usage
//!
//! ```
//! use pips_engine::core::SessionConfig;
//! use pips_engine::puzzle::PuzzleLoader;
//!
//! let json = r#"{ "width": 2, "height": 1, "dominos": ["34"],
//!     "regions": [{ "id": 1, "rule": "7", "cells": [{"row":0,"col":0},{"row":0,"col":1}] }] }"#;
//! let state = PuzzleLoader::new(SessionConfig::new()).load_json(json).unwrap();
//! assert_eq!(state.board.domino_count(), 1);
//! ```

pub mod definition;
pub mod loader;
pub mod validator;

pub use definition::{PuzzleDefinition, RegionDef, RegionLabel, StartingDomino};
pub use loader::{LoadError, PuzzleLoader};
pub use validator::{
    StructuralError, StructuralErrorCode, StructuralValidator, ValidationReport, ValidationStatus,
};
