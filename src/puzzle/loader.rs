//! Builds a `PuzzleState` from a validated definition.
//!
//! Loading order:
//! 1. Structural validation (nothing is built on rejection)
//! 2. Dominos in the tray, home slot = position in the sorted list
//! 3. Grid with blocked cells
//! 4. Starting placements, each through the placement engine
//! 5. Region map and compiled rules

use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{info, warn};

use super::definition::PuzzleDefinition;
use super::validator::{StructuralValidator, ValidationReport};
use crate::core::{
    Board, Cell, Domino, DominoId, DominoIdError, Grid, Placement, PuzzleState, SessionConfig,
};
use crate::engine::PlacementRejected;
use crate::regions::{Region, RegionId, RegionMap, RegionMapBuilder, Rule, RuleParseError};

/// Why a puzzle could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("puzzle definition rejected: {0}")]
    Rejected(ValidationReport),
    #[error("invalid puzzle JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidDominoId(#[from] DominoIdError),
    #[error("region {region} has an invalid rule: {source}")]
    InvalidRule {
        region: String,
        #[source]
        source: RuleParseError,
    },
    #[error("region {0} has no usable shape")]
    MissingRegionShape(String),
    #[error("{0} regions exceed the region id range")]
    TooManyRegions(usize),
    #[error("starting domino {domino} cannot be placed: {reason}")]
    StartingPlacement {
        domino: DominoId,
        reason: PlacementRejected,
    },
}

/// Loads puzzle definitions under a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct PuzzleLoader {
    config: SessionConfig,
}

impl PuzzleLoader {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Parse and load a JSON definition.
    pub fn load_json(&self, json: &str) -> Result<PuzzleState, LoadError> {
        let def = PuzzleDefinition::from_json(json)?;
        self.load(&def)
    }

    /// Validate `def` and build the initial state.
    pub fn load(&self, def: &PuzzleDefinition) -> Result<PuzzleState, LoadError> {
        let report = StructuralValidator::new(&self.config).validate(def);
        if !report.is_accepted() {
            warn!(errors = report.errors.len(), "puzzle definition rejected");
            return Err(LoadError::Rejected(report));
        }

        // Accepted dimensions are positive and fit in i32.
        let rows = def.height as usize;
        let cols = def.width as usize;

        let dominos = def
            .dominos
            .iter()
            .enumerate()
            .map(|(slot, name)| Domino::create(name, slot))
            .collect::<Result<Vec<_>, _>>()?;

        let mut grid = Grid::create(cols, rows);
        for &cell in &def.blocked {
            grid.block(cell);
        }
        let mut board = Board::new(grid, dominos);

        let mut starting_domino_ids = im::HashSet::new();
        for start in &def.starting_dominos {
            let id = DominoId::parse(&start.domino)?;
            let [first, second] = start.cells;
            board
                .place_or_move(id, Placement::new(first, second))
                .map_err(|reason| LoadError::StartingPlacement { domino: id, reason })?;
            starting_domino_ids.insert(id);
        }

        let mut builder = RegionMapBuilder::new(rows, cols);
        let mut regions = Vec::with_capacity(def.regions.len());
        for (i, region_def) in def.regions.iter().enumerate() {
            let label = region_def.id.to_string();
            let rule = Rule::from_spec(&region_def.rule).map_err(|source| {
                LoadError::InvalidRule {
                    region: label.clone(),
                    source,
                }
            })?;
            let shape = region_def
                .shape()
                .ok_or_else(|| LoadError::MissingRegionShape(label.clone()))?;

            let id = RegionId::from_index(i)
                .ok_or(LoadError::TooManyRegions(def.regions.len()))?;
            let cells = builder.add(id, &shape);
            regions.push(Region::new(id, label, rule, cells));
        }
        if builder.dropped() > 0 {
            warn!(dropped = builder.dropped(), "region cells outside the board were ignored");
        }
        let region_map = builder.build();

        let uncovered = count_uncovered(&board, &region_map);
        info!(
            rows,
            cols,
            dominos = board.domino_count(),
            placed = starting_domino_ids.len(),
            regions = regions.len(),
            uncovered,
            "puzzle loaded"
        );

        Ok(PuzzleState {
            board,
            region_map,
            regions,
            starting_domino_ids,
        })
    }
}

/// Playable cells that belong to no region.
fn count_uncovered(board: &Board, region_map: &RegionMap) -> usize {
    let grid = board.grid();
    let blocked: FxHashSet<_> = grid.blocked_cells().collect();
    (0..grid.rows() as i32)
        .flat_map(|row| (0..grid.cols() as i32).map(move |col| Cell::new(row, col)))
        .filter(|cell| !blocked.contains(cell) && region_map.region_at(*cell).is_none())
        .count()
}
