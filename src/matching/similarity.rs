// src/matching/similarity.rs - Candidate pools and fuzzy scoring

use strsim::normalized_levenshtein;

use crate::matching::normalize::clean_prefix;
use crate::models::core::{CanonicalRegion, GeoLevel};

/// Edit-distance similarity between two strings on a 0-100 scale,
/// 100 = identical. Case-sensitive; callers fold case where the level
/// policy calls for it.
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * 100.0
}

/// Best-scoring candidate for `query` over `pool`, scanned in pool order.
/// Ties resolve to the first-encountered maximum, so results are
/// deterministic for a fixed pool ordering. `None` only for an empty pool.
pub fn best_match(query: &str, pool: &[String]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, candidate) in pool.iter().enumerate() {
        let score = similarity(query, candidate);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((idx, score)),
        }
    }
    best
}

/// Result of matching one needle against a pool. The best score is kept
/// even on rejection so it can be reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    pub index: Option<usize>,
    pub score: f64,
}

/// Composes [`best_match`] with a threshold: the index is present iff the
/// best score reaches `threshold`. An empty pool yields `(None, 0)`.
pub fn match_one(needle: &str, pool: &[String], threshold: f64) -> MatchOutcome {
    match best_match(needle, pool) {
        Some((idx, score)) if score >= threshold => MatchOutcome {
            index: Some(idx),
            score,
        },
        Some((_, score)) => MatchOutcome { index: None, score },
        None => MatchOutcome {
            index: None,
            score: 0.0,
        },
    }
}

/// Ordered canonical names for one geography level, loaded once per stage.
/// Ward names are pre-cleaned and upper-cased at construction; province and
/// district names are matched as stored.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    regions: Vec<CanonicalRegion>,
    names: Vec<String>,
}

impl CandidatePool {
    pub fn new(level: GeoLevel, regions: Vec<CanonicalRegion>) -> Self {
        let names = regions
            .iter()
            .map(|r| match level {
                GeoLevel::Ward => clean_prefix(&r.name).to_uppercase(),
                _ => r.name.clone(),
            })
            .collect();
        Self { regions, names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn id_at(&self, index: usize) -> i64 {
        self.regions[index].id
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(similarity("XUÂN ĐỈNH", "XUÂN ĐỈNH"), 100.0);
    }

    #[test]
    fn disjoint_strings_score_low() {
        assert!(similarity("Hà Nội", "Cà Mau") < 50.0);
    }

    #[test]
    fn best_match_picks_maximum() {
        let pool = pool(&["Hà Nội", "Hải Phòng", "Hà Nam"]);
        let (idx, score) = best_match("Hà Nội", &pool).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(score, 100.0);
    }

    #[test]
    fn best_match_ties_resolve_to_first() {
        let pool = pool(&["Tân An", "Tân An", "Tân An"]);
        let (idx, score) = best_match("Tân An", &pool).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(score, 100.0);
    }

    #[test]
    fn best_match_empty_pool() {
        assert_eq!(best_match("Hà Nội", &[]), None);
    }

    #[test]
    fn best_match_is_deterministic() {
        let pool = pool(&["Long Biên", "Long An", "Long Xuyên"]);
        let first = best_match("Long Biên", &pool);
        for _ in 0..10 {
            assert_eq!(best_match("Long Biên", &pool), first);
        }
    }

    #[test]
    fn match_one_accepts_at_threshold() {
        let pool = pool(&["Long Biên"]);
        let outcome = match_one("Long Biên", &pool, 100.0);
        assert_eq!(outcome.index, Some(0));
        assert_eq!(outcome.score, 100.0);
    }

    #[test]
    fn match_one_rejects_below_threshold_but_reports_score() {
        // "Quận Long Biên" against the raw canonical name: the district
        // level applies no prefix stripping, so the score falls short.
        let pool = pool(&["Long Biên"]);
        let outcome = match_one("Quận Long Biên", &pool, 75.0);
        assert_eq!(outcome.index, None);
        assert!(outcome.score > 0.0);
        assert!(outcome.score < 75.0);
    }

    #[test]
    fn match_one_empty_pool_is_zero_score_rejection() {
        let outcome = match_one("Hà Nội", &[], 70.0);
        assert_eq!(outcome.index, None);
        assert_eq!(outcome.score, 0.0);
    }

    #[test]
    fn ward_pool_cleans_and_uppercases_names() {
        let regions = vec![
            CanonicalRegion {
                id: 11,
                name: "Phường Xuân Đỉnh".to_string(),
            },
            CanonicalRegion {
                id: 12,
                name: "Thị trấn Đông Anh".to_string(),
            },
        ];
        let pool = CandidatePool::new(GeoLevel::Ward, regions);
        assert_eq!(pool.names(), ["XUÂN ĐỈNH", "ĐÔNG ANH"]);
        assert_eq!(pool.id_at(0), 11);
    }

    #[test]
    fn province_pool_keeps_names_as_stored() {
        let regions = vec![CanonicalRegion {
            id: 1,
            name: "Thành phố Hà Nội".to_string(),
        }];
        let pool = CandidatePool::new(GeoLevel::Province, regions);
        assert_eq!(pool.names(), ["Thành phố Hà Nội"]);
        assert!(!pool.is_empty());
        assert_eq!(pool.len(), 1);
    }
}
