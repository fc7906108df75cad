//! Declarative puzzle definition, as read from a puzzle file.
//!
//! ```json
//! {
//!   "width": 4, "height": 2,
//!   "dominos": ["12", "34", "55", "66"],
//!   "startingDominos": [{ "domino": "66", "cells": [{"row":1,"col":2},{"row":1,"col":3}] }],
//!   "blocked": [],
//!   "regions": [
//!     { "id": "a", "rule": "<=4", "cells": [{"row":0,"col":0},{"row":0,"col":1}] },
//!     { "id": 2, "rule": {"op": "=", "value": 12}, "rectangle": {"top":1,"left":2,"width":2,"height":1} }
//!   ]
//! }
//! ```
//!
//! Nothing here is validated. Ids are kept as text until the structural
//! validator has accepted the whole definition.

use serde::{Deserialize, Serialize};

use crate::core::Cell;
use crate::regions::{Rect, RegionShape, RuleSpec};

/// A complete puzzle definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDefinition {
    pub width: i64,
    pub height: i64,

    /// Domino names; must be sorted and distinct.
    #[serde(default)]
    pub dominos: Vec<String>,

    /// Dominos already on the board when the puzzle starts.
    #[serde(default)]
    pub starting_dominos: Vec<StartingDomino>,

    #[serde(default)]
    pub blocked: Vec<Cell>,

    #[serde(default)]
    pub regions: Vec<RegionDef>,
}

impl PuzzleDefinition {
    /// Parse a definition from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A pre-placed domino: `cells[0]` takes half 0, `cells[1]` half 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingDomino {
    pub domino: String,
    pub cells: [Cell; 2],
}

/// Region identifier as written by the author.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegionLabel {
    Text(String),
    Number(i64),
}

impl std::fmt::Display for RegionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionLabel::Text(text) => f.write_str(text),
            RegionLabel::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A region declaration. Exactly one of `cells` and `rectangle` is set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDef {
    pub id: RegionLabel,
    pub rule: RuleSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cells: Option<Vec<Cell>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rectangle: Option<Rect>,
}

impl RegionDef {
    /// The declared shape, or `None` if both or neither form is given.
    #[must_use]
    pub fn shape(&self) -> Option<RegionShape> {
        match (&self.cells, &self.rectangle) {
            (Some(cells), None) => Some(RegionShape::Cells(cells.clone())),
            (None, Some(rect)) => Some(RegionShape::Rectangle(*rect)),
            _ => None,
        }
    }
}
