//! Domino identity and per-domino state.
//!
//! ## Catalog
//!
//! A double-six set has 28 tiles. Each tile is identified by its canonical
//! two-digit name `"ab"` with `a <= b`, e.g. `"00"`, `"23"`, `"66"`.
//! `DominoId` is the only identifier type used past the loader boundary:
//! it can only be built from a canonical name, so every `DominoId` in the
//! engine refers to a real tile.
//!
//! ## Usage
//!
//! ```
//! use pips_engine::core::{DominoId, Half};
//!
//! let id: DominoId = "23".parse().unwrap();
//! assert_eq!(id.pip(Half::First), 2);
//! assert_eq!(id.pip(Half::Second), 3);
//! assert_eq!(id.to_string(), "23");
//!
//! assert!("32".parse::<DominoId>().is_err()); // not canonical
//! assert!("27".parse::<DominoId>().is_err()); // pip out of range
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::coord::{Half, Placement};

/// Highest pip value in a double-six set.
pub const MAX_PIP: u8 = 6;

/// Number of tiles in a double-six set.
pub const CATALOG_SIZE: usize = 28;

/// Reasons a domino name is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DominoIdError {
    #[error("invalid domino id {0:?}: expected two digits")]
    Malformed(String),
    #[error("invalid domino id {0:?}: pips must be between 0 and 6")]
    PipOutOfRange(String),
    #[error("invalid domino id {0:?}: first pip must not exceed second")]
    NotCanonical(String),
}

/// Canonical domino identifier (`low <= high`, both in `0..=6`).
///
/// Ordering matches the sorted order of the two-character names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DominoId {
    low: u8,
    high: u8,
}

impl DominoId {
    /// The full catalog in sorted order.
    pub const ALL: [DominoId; CATALOG_SIZE] = {
        let mut out = [DominoId { low: 0, high: 0 }; CATALOG_SIZE];
        let mut i = 0;
        let mut low = 0;
        while low <= MAX_PIP {
            let mut high = low;
            while high <= MAX_PIP {
                out[i] = DominoId { low, high };
                i += 1;
                high += 1;
            }
            low += 1;
        }
        out
    };

    /// Build an id from its two pips.
    pub fn from_pips(low: u8, high: u8) -> Result<Self, DominoIdError> {
        if low > MAX_PIP || high > MAX_PIP {
            return Err(DominoIdError::PipOutOfRange(format!("{low}{high}")));
        }
        if low > high {
            return Err(DominoIdError::NotCanonical(format!("{low}{high}")));
        }
        Ok(Self { low, high })
    }

    /// Parse a canonical two-digit name.
    pub fn parse(text: &str) -> Result<Self, DominoIdError> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(DominoIdError::Malformed(text.to_string()));
        }
        // Two ASCII digits print back as `text`, so the error text matches.
        Self::from_pips(bytes[0] - b'0', bytes[1] - b'0')
    }

    /// Pip value carried by a half.
    #[must_use]
    pub const fn pip(self, half: Half) -> u8 {
        match half {
            Half::First => self.low,
            Half::Second => self.high,
        }
    }

    /// Check if both halves carry the same value.
    #[must_use]
    pub const fn is_double(self) -> bool {
        self.low == self.high
    }

    /// Position of this tile in the sorted catalog.
    #[must_use]
    pub const fn catalog_index(self) -> usize {
        // Tiles with a smaller low pip come first: sum of (7 - l) for l < low.
        let low = self.low as usize;
        let before = low * (MAX_PIP as usize + 1) - low * low.saturating_sub(1) / 2;
        before + (self.high - self.low) as usize
    }
}

impl FromStr for DominoId {
    type Err = DominoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DominoId {
    type Error = DominoIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DominoId> for String {
    fn from(id: DominoId) -> Self {
        id.to_string()
    }
}

impl std::fmt::Display for DominoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.low, self.high)
    }
}

/// Cosmetic rotation of a domino sitting in the tray.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrayOrientation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl TrayOrientation {
    /// Advance by +90°, wrapping at 360.
    #[must_use]
    pub const fn rotated_clockwise(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// Angle in degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }
}

/// A domino in play.
///
/// The pips are fixed by the id for the object's lifetime. Board geometry is
/// `None` while the domino sits in the tray; there is no way to represent a
/// half-placed domino.
///
/// Geometry and tray orientation are only changed by the placement engine,
/// so external readers get accessors and no setters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domino {
    id: DominoId,
    home_slot: usize,
    placement: Option<Placement>,
    tray_orientation: TrayOrientation,
}

impl Domino {
    /// Create a domino in the tray at `home_slot`.
    #[must_use]
    pub fn new(id: DominoId, home_slot: usize) -> Self {
        Self {
            id,
            home_slot,
            placement: None,
            tray_orientation: TrayOrientation::Deg0,
        }
    }

    /// Create a domino from its textual name.
    pub fn create(name: &str, home_slot: usize) -> Result<Self, DominoIdError> {
        Ok(Self::new(DominoId::parse(name)?, home_slot))
    }

    #[must_use]
    pub fn id(&self) -> DominoId {
        self.id
    }

    /// Pip value of half 0.
    #[must_use]
    pub fn pip0(&self) -> u8 {
        self.id.pip(Half::First)
    }

    /// Pip value of half 1.
    #[must_use]
    pub fn pip1(&self) -> u8 {
        self.id.pip(Half::Second)
    }

    /// Stable tray index assigned at load.
    #[must_use]
    pub fn home_slot(&self) -> usize {
        self.home_slot
    }

    /// Current board geometry, `None` when in the tray.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    #[must_use]
    pub fn tray_orientation(&self) -> TrayOrientation {
        self.tray_orientation
    }

    /// Check if the domino is on the board.
    #[must_use]
    pub fn is_on_board(&self) -> bool {
        self.placement.is_some()
    }

    pub(crate) fn set_placement(&mut self, placement: Option<Placement>) {
        self.placement = placement;
    }

    pub(crate) fn set_tray_orientation(&mut self, orientation: TrayOrientation) {
        self.tray_orientation = orientation;
    }
}
