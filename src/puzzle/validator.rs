//! Structural validation of a puzzle definition.
//!
//! Runs once, before any engine object exists. The result is either
//! `Accepted` or `Rejected` with every problem found, each tagged with a
//! stable code and a path into the definition (`dominos[3]`,
//! `regions[1].rule`, ...). Validation never stops at the first error.
//!
//! Starting placements are only checked for naming a known, distinct
//! domino here. Their geometry goes through the placement engine when the
//! loader applies them.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::definition::PuzzleDefinition;
use crate::core::{Cell, DominoId, RegionOverlap, SessionConfig};
use crate::regions::{RegionId, RegionShape, Rule};

/// Stable error codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StructuralErrorCode {
    InvalidDimensions,
    InvalidDominoId,
    DominosNotSorted,
    DuplicateDomino,
    DominoCountMismatch,
    BlockedOutOfBounds,
    DuplicateBlocked,
    UnknownStartingDomino,
    DuplicateStartingDomino,
    DuplicateRegionId,
    InvalidRegionShape,
    InvalidRectangle,
    InvalidRule,
    RegionOverlap,
    TooManyRegions,
}

impl StructuralErrorCode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidDimensions => "INVALID_DIMENSIONS",
            Self::InvalidDominoId => "INVALID_DOMINO_ID",
            Self::DominosNotSorted => "DOMINOS_NOT_SORTED",
            Self::DuplicateDomino => "DUPLICATE_DOMINO",
            Self::DominoCountMismatch => "DOMINO_COUNT_MISMATCH",
            Self::BlockedOutOfBounds => "BLOCKED_OUT_OF_BOUNDS",
            Self::DuplicateBlocked => "DUPLICATE_BLOCKED",
            Self::UnknownStartingDomino => "UNKNOWN_STARTING_DOMINO",
            Self::DuplicateStartingDomino => "DUPLICATE_STARTING_DOMINO",
            Self::DuplicateRegionId => "DUPLICATE_REGION_ID",
            Self::InvalidRegionShape => "INVALID_REGION_SHAPE",
            Self::InvalidRectangle => "INVALID_RECTANGLE",
            Self::InvalidRule => "INVALID_RULE",
            Self::RegionOverlap => "REGION_OVERLAP",
            Self::TooManyRegions => "TOO_MANY_REGIONS",
        }
    }
}

impl std::fmt::Display for StructuralErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structural problem.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code} at {path}: {message}")]
pub struct StructuralError {
    pub code: StructuralErrorCode,
    pub message: String,
    pub path: String,
}

impl StructuralError {
    pub fn new(code: StructuralErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: path.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationStatus {
    Accepted,
    Rejected,
}

/// Outcome of validating one definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: ValidationStatus,
    pub errors: Vec<StructuralError>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<StructuralError>) -> Self {
        let status = if errors.is_empty() {
            ValidationStatus::Accepted
        } else {
            ValidationStatus::Rejected
        };
        Self { status, errors }
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }

    /// Check whether any error carries `code`.
    #[must_use]
    pub fn has(&self, code: StructuralErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            ValidationStatus::Accepted => write!(f, "accepted"),
            ValidationStatus::Rejected => {
                write!(f, "rejected with {} error(s)", self.errors.len())?;
                for error in &self.errors {
                    write!(f, "\n  {}", error)?;
                }
                Ok(())
            }
        }
    }
}

/// Checks a `PuzzleDefinition` before loading.
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuralValidator {
    region_overlap: RegionOverlap,
}

impl StructuralValidator {
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            region_overlap: config.region_overlap,
        }
    }

    /// Validate `def`, collecting every error.
    #[must_use]
    pub fn validate(&self, def: &PuzzleDefinition) -> ValidationReport {
        let mut errors = Vec::new();

        let dims = check_dimensions(def, &mut errors);
        let dominos = check_dominos(def, &mut errors);
        let blocked = dims.map(|(rows, cols)| check_blocked(def, rows, cols, &mut errors));

        if let Some(blocked) = blocked {
            let area = def.width * def.height;
            let playable = area - blocked as i64;
            let needed = 2 * def.dominos.len() as i64;
            if playable != needed {
                errors.push(StructuralError::new(
                    StructuralErrorCode::DominoCountMismatch,
                    "dominos",
                    format!(
                        "{} playable cells cannot hold {} dominos ({} cells)",
                        playable,
                        def.dominos.len(),
                        needed
                    ),
                ));
            }
        }

        check_starting(def, &dominos, &mut errors);
        self.check_regions(def, dims, &mut errors);

        for error in &errors {
            debug!(%error, "structural error");
        }
        ValidationReport::from_errors(errors)
    }

    fn check_regions(
        &self,
        def: &PuzzleDefinition,
        dims: Option<(i64, i64)>,
        errors: &mut Vec<StructuralError>,
    ) {
        if def.regions.len() > RegionId::LIMIT {
            errors.push(StructuralError::new(
                StructuralErrorCode::TooManyRegions,
                "regions",
                format!(
                    "{} regions declared, at most {} allowed",
                    def.regions.len(),
                    RegionId::LIMIT
                ),
            ));
        }

        let mut labels = FxHashSet::default();
        // In-bounds cell -> index of the first region claiming it.
        let mut claims: FxHashMap<Cell, usize> = FxHashMap::default();

        for (i, region) in def.regions.iter().enumerate() {
            let path = format!("regions[{}]", i);

            if !labels.insert(region.id.clone()) {
                errors.push(StructuralError::new(
                    StructuralErrorCode::DuplicateRegionId,
                    format!("{}.id", path),
                    format!("region id {} is used more than once", region.id),
                ));
            }

            if let Err(e) = Rule::from_spec(&region.rule) {
                errors.push(StructuralError::new(
                    StructuralErrorCode::InvalidRule,
                    format!("{}.rule", path),
                    e.to_string(),
                ));
            }

            let Some(shape) = region.shape() else {
                errors.push(StructuralError::new(
                    StructuralErrorCode::InvalidRegionShape,
                    path,
                    "region must declare exactly one of `cells` or `rectangle`",
                ));
                continue;
            };

            if let RegionShape::Rectangle(rect) = &shape {
                if rect.width <= 0 || rect.height <= 0 {
                    errors.push(StructuralError::new(
                        StructuralErrorCode::InvalidRectangle,
                        format!("{}.rectangle", path),
                        format!("rectangle size {}x{} is not positive", rect.width, rect.height),
                    ));
                    continue;
                }
            }

            if self.region_overlap == RegionOverlap::LastWriteWins {
                continue;
            }
            let Some((rows, cols)) = dims else {
                continue;
            };
            // Accepted dimensions fit in i32.
            for cell in shape.cells_within(rows as usize, cols as usize) {
                let owner = *claims.entry(cell).or_insert(i);
                if owner != i {
                    errors.push(StructuralError::new(
                        StructuralErrorCode::RegionOverlap,
                        path.clone(),
                        format!(
                            "cell {} is already in region {}",
                            cell, def.regions[owner].id
                        ),
                    ));
                }
            }
        }
    }
}

fn in_bounds(cell: Cell, rows: i64, cols: i64) -> bool {
    let (row, col) = (i64::from(cell.row), i64::from(cell.col));
    (0..rows).contains(&row) && (0..cols).contains(&col)
}

/// Returns `(rows, cols)` when both are positive.
fn check_dimensions(def: &PuzzleDefinition, errors: &mut Vec<StructuralError>) -> Option<(i64, i64)> {
    let mut ok = true;
    for (name, value) in [("width", def.width), ("height", def.height)] {
        if value <= 0 || value > i64::from(i32::MAX) {
            errors.push(StructuralError::new(
                StructuralErrorCode::InvalidDimensions,
                name,
                format!("{} must be a positive integer, got {}", name, value),
            ));
            ok = false;
        }
    }
    ok.then_some((def.height, def.width))
}

/// Returns the ids that parsed.
fn check_dominos(def: &PuzzleDefinition, errors: &mut Vec<StructuralError>) -> FxHashSet<DominoId> {
    let mut seen = FxHashSet::default();
    let mut prev: Option<DominoId> = None;

    for (i, name) in def.dominos.iter().enumerate() {
        let path = format!("dominos[{}]", i);
        let id = match DominoId::parse(name) {
            Ok(id) => id,
            Err(e) => {
                errors.push(StructuralError::new(
                    StructuralErrorCode::InvalidDominoId,
                    path,
                    e.to_string(),
                ));
                continue;
            }
        };

        if !seen.insert(id) {
            errors.push(StructuralError::new(
                StructuralErrorCode::DuplicateDomino,
                path,
                format!("domino {} is listed more than once", id),
            ));
        } else if prev.is_some_and(|p| p > id) {
            errors.push(StructuralError::new(
                StructuralErrorCode::DominosNotSorted,
                path,
                format!("domino {} is out of order", id),
            ));
        }
        prev = Some(id);
    }
    seen
}

/// Returns the number of distinct in-bounds blocked cells.
fn check_blocked(
    def: &PuzzleDefinition,
    rows: i64,
    cols: i64,
    errors: &mut Vec<StructuralError>,
) -> usize {
    let mut seen = FxHashSet::default();
    for (i, &cell) in def.blocked.iter().enumerate() {
        let path = format!("blocked[{}]", i);
        if !in_bounds(cell, rows, cols) {
            errors.push(StructuralError::new(
                StructuralErrorCode::BlockedOutOfBounds,
                path,
                format!("blocked cell {} is outside the board", cell),
            ));
        } else if !seen.insert(cell) {
            errors.push(StructuralError::new(
                StructuralErrorCode::DuplicateBlocked,
                path,
                format!("cell {} is blocked more than once", cell),
            ));
        }
    }
    seen.len()
}

fn check_starting(
    def: &PuzzleDefinition,
    known: &FxHashSet<DominoId>,
    errors: &mut Vec<StructuralError>,
) {
    let mut seen = FxHashSet::default();
    for (i, start) in def.starting_dominos.iter().enumerate() {
        let path = format!("startingDominos[{}].domino", i);
        let id = match DominoId::parse(&start.domino) {
            Ok(id) => id,
            Err(e) => {
                errors.push(StructuralError::new(
                    StructuralErrorCode::InvalidDominoId,
                    path,
                    e.to_string(),
                ));
                continue;
            }
        };

        if !known.contains(&id) {
            errors.push(StructuralError::new(
                StructuralErrorCode::UnknownStartingDomino,
                path,
                format!("starting domino {} is not in the domino list", id),
            ));
        } else if !seen.insert(id) {
            errors.push(StructuralError::new(
                StructuralErrorCode::DuplicateStartingDomino,
                path,
                format!("domino {} is pre-placed more than once", id),
            ));
        }
    }
}
