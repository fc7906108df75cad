//! Session configuration.
//!
//! Callers configure a puzzle session at load time by providing a
//! `SessionConfig`. Defaults suit published puzzles: overlapping regions
//! are a structural error and the undo history is unbounded.

use serde::{Deserialize, Serialize};

/// How the loader treats two regions claiming the same cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionOverlap {
    /// Overlap is a structural error (`REGION_OVERLAP`).
    #[default]
    Reject,
    /// Overlap is accepted; the region listed later owns the shared cell.
    LastWriteWins,
}

/// Configuration for a puzzle session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Policy for cells claimed by more than one region.
    pub region_overlap: RegionOverlap,

    /// Maximum undo entries kept. `None` for unlimited.
    ///
    /// When the limit is exceeded the oldest entry is dropped.
    pub history_limit: Option<usize>,
}

impl SessionConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the region overlap policy.
    #[must_use]
    pub fn with_region_overlap(mut self, policy: RegionOverlap) -> Self {
        self.region_overlap = policy;
        self
    }

    /// Cap the undo history.
    ///
    /// Panics if `limit` is zero.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        assert!(limit > 0, "History limit must be at least 1");
        self.history_limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::new();
        assert_eq!(config.region_overlap, RegionOverlap::Reject);
        assert_eq!(config.history_limit, None);
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::new()
            .with_region_overlap(RegionOverlap::LastWriteWins)
            .with_history_limit(50);

        assert_eq!(config.region_overlap, RegionOverlap::LastWriteWins);
        assert_eq!(config.history_limit, Some(50));
    }

    #[test]
    #[should_panic(expected = "History limit must be at least 1")]
    fn test_zero_history_limit() {
        let _ = SessionConfig::new().with_history_limit(0);
    }
}
