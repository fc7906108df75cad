//! Placement engine: the only code allowed to mutate a `Board`.
//!
//! - `placement`: atomic place/move, return-to-tray, tray rotation
//! - `rotation`: two-phase rotate/commit with an explicit transaction value
//!
//! Every operation either commits completely or returns a
//! `PlacementRejected` with the board untouched.

pub mod placement;
pub mod rotation;

pub use placement::{PlacementChange, PlacementRejected};
pub use rotation::RotationTxn;
