//! Regions: per-cell region lookup, rules, and rule evaluation.
//!
//! ## Key Types
//!
//! - `RegionId`: Index of a region in load order
//! - `Rule`: Compiled comparator + integer target
//! - `RegionMap`: Dense per-cell lookup, immutable after load
//! - `RegionEvaluator`: Pure sum-and-compare over a grid

pub mod evaluator;
pub mod map;
pub mod region;
pub mod rule;

pub use evaluator::{RegionEvaluator, RegionReport};
pub use map::{Rect, RegionId, RegionMap, RegionMapBuilder, RegionShape};
pub use region::Region;
pub use rule::{Comparator, Rule, RuleParseError, RuleSpec};
