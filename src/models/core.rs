// src/models/core.rs

use std::fmt;
use std::time::Duration;

use crate::utils::constants::{
    DISTRICT_MATCH_THRESHOLD, PROVINCE_MATCH_THRESHOLD, WARD_MATCH_THRESHOLD,
};

/// The three administrative-geography levels, in mapping order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeoLevel {
    Province,
    District,
    Ward,
}

impl GeoLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoLevel::Province => "province",
            GeoLevel::District => "district",
            GeoLevel::Ward => "ward",
        }
    }

    /// Minimum similarity score (0-100) required to accept a match at this
    /// level. Finer-grained levels collide more often, so the bar rises.
    pub fn threshold(&self) -> f64 {
        match self {
            GeoLevel::Province => PROVINCE_MATCH_THRESHOLD,
            GeoLevel::District => DISTRICT_MATCH_THRESHOLD,
            GeoLevel::Ward => WARD_MATCH_THRESHOLD,
        }
    }
}

impl fmt::Display for GeoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authoritative geography record from the reference tables.
/// Read-only for the duration of a run.
#[derive(Debug, Clone)]
pub struct CanonicalRegion {
    pub id: i64,
    pub name: String,
}

/// An externally supplied geography row awaiting resolution.
///
/// `update_keys` carries the values that scope the persistence update for
/// this row, in the order the stage's UPDATE statement binds them after the
/// canonical id: the row's own id for provinces, provider id + external id
/// for districts and wards.
#[derive(Debug, Clone)]
pub struct ProviderRegion {
    pub external_name: String,
    pub update_keys: Vec<i64>,
}

/// Outcome of resolving one provider row against a candidate pool.
/// Transient: accepted results are written back to the provider row,
/// rejected ones only reach the unmatched report.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingResult {
    pub canonical_id: Option<i64>,
    pub score: f64,
    pub accepted: bool,
}

/// Per-stage counters surfaced in the run summary.
#[derive(Debug, Clone)]
pub struct LevelStats {
    pub level: GeoLevel,
    pub processed: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub duration: Duration,
}

impl LevelStats {
    pub fn new(level: GeoLevel) -> Self {
        Self {
            level,
            processed: 0,
            matched: 0,
            unmatched: 0,
            duration: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_increase_with_granularity() {
        assert!(GeoLevel::Province.threshold() < GeoLevel::District.threshold());
        assert!(GeoLevel::District.threshold() < GeoLevel::Ward.threshold());
    }

    #[test]
    fn level_names() {
        assert_eq!(GeoLevel::Province.as_str(), "province");
        assert_eq!(GeoLevel::District.as_str(), "district");
        assert_eq!(GeoLevel::Ward.as_str(), "ward");
    }
}
