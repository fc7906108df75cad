//! Region rule evaluation.
//!
//! Evaluation is a pure read of the grid: it never mutates anything and can
//! run on a partially filled board. Empty cells contribute 0.

use serde::{Deserialize, Serialize};

use super::map::{RegionId, RegionMap};
use super::region::Region;
use super::rule::Rule;
use crate::core::Grid;

/// Outcome of evaluating one region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionReport {
    pub id: RegionId,
    pub label: String,
    pub current_value: i64,
    pub satisfied: bool,
    pub rule: Rule,
}

/// Evaluator for region rules.
pub struct RegionEvaluator;

impl RegionEvaluator {
    /// Sum the pips covering every cell mapped to `region`.
    ///
    /// Each occupied cell contributes the pip of the half lying on it.
    #[must_use]
    pub fn compute_region_sum(grid: &Grid, region_map: &RegionMap, region: RegionId) -> i64 {
        region_map
            .cells_of(region)
            .filter_map(|cell| grid.get_cell(cell))
            .map(|occupant| i64::from(occupant.pip()))
            .sum()
    }

    /// Apply a rule to a sum.
    #[must_use]
    pub fn apply_rule(sum: i64, rule: &Rule) -> bool {
        rule.is_satisfied_by(sum)
    }

    /// Evaluate one region.
    #[must_use]
    pub fn evaluate(grid: &Grid, region_map: &RegionMap, region: &Region) -> RegionReport {
        let current_value = Self::compute_region_sum(grid, region_map, region.id);
        RegionReport {
            id: region.id,
            label: region.label.clone(),
            current_value,
            satisfied: Self::apply_rule(current_value, &region.rule),
            rule: region.rule,
        }
    }

    /// Evaluate every region, in region order.
    #[must_use]
    pub fn evaluate_all_regions(
        grid: &Grid,
        region_map: &RegionMap,
        regions: &[Region],
    ) -> Vec<RegionReport> {
        regions
            .iter()
            .map(|region| Self::evaluate(grid, region_map, region))
            .collect()
    }
}
