//! Core puzzle types: coordinates, dominos, the grid, state, configuration.
//!
//! Everything here is data. Mutation rules live in `crate::engine`.

pub mod config;
pub mod coord;
pub mod domino;
pub mod grid;
pub mod state;

pub use config::{RegionOverlap, SessionConfig};
pub use coord::{Cell, Half, Placement};
pub use domino::{Domino, DominoId, DominoIdError, TrayOrientation, CATALOG_SIZE, MAX_PIP};
pub use grid::{Grid, Occupant};
pub use state::{Board, ConsistencyError, PuzzleState};
