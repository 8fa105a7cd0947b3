// src/matching/unmatched.rs - Accumulates rows that failed threshold

use log::{info, warn};

use crate::models::core::GeoLevel;

#[derive(Debug, Clone)]
pub struct UnmatchedEntry {
    pub level: GeoLevel,
    pub external_name: String,
    pub score: f64,
}

/// Collects provider rows whose best score fell below the level threshold,
/// for operator review. Entries are logged as they arrive and summarized
/// at run end; nothing is persisted to the store.
#[derive(Debug, Default)]
pub struct UnmatchedReporter {
    entries: Vec<UnmatchedEntry>,
}

impl UnmatchedReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, level: GeoLevel, external_name: &str, score: f64) {
        warn!(
            "❌ Unmatched {}: \"{}\" (best score {:.1})",
            level, external_name, score
        );
        self.entries.push(UnmatchedEntry {
            level,
            external_name: external_name.to_string(),
            score,
        });
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn count_for_level(&self, level: GeoLevel) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }

    pub fn entries(&self) -> &[UnmatchedEntry] {
        &self.entries
    }

    /// Logs the run-end listing for operator inspection.
    pub fn log_summary(&self) {
        if self.entries.is_empty() {
            info!("✅ No unmatched provider rows");
            return;
        }
        warn!("=== Unmatched Rows ({}) ===", self.entries.len());
        for level in [GeoLevel::Province, GeoLevel::District, GeoLevel::Ward] {
            let count = self.count_for_level(level);
            if count > 0 {
                warn!("{}: {} unmatched", level, count);
            }
        }
        for entry in &self.entries {
            warn!(
                "  [{}] \"{}\" (best score {:.1})",
                entry.level, entry.external_name, entry.score
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_level() {
        let mut reporter = UnmatchedReporter::new();
        reporter.record(GeoLevel::District, "Quận Long Biên", 72.0);
        reporter.record(GeoLevel::Ward, "Phường Ba Đình", 61.5);
        reporter.record(GeoLevel::Ward, "Xã Vĩnh Quỳnh", 80.0);

        assert_eq!(reporter.count(), 3);
        assert_eq!(reporter.count_for_level(GeoLevel::Province), 0);
        assert_eq!(reporter.count_for_level(GeoLevel::District), 1);
        assert_eq!(reporter.count_for_level(GeoLevel::Ward), 2);
    }

    #[test]
    fn entries_keep_name_and_score() {
        let mut reporter = UnmatchedReporter::new();
        reporter.record(GeoLevel::District, "Quận Long Biên", 72.0);
        let entry = &reporter.entries()[0];
        assert_eq!(entry.external_name, "Quận Long Biên");
        assert_eq!(entry.score, 72.0);
    }

    #[test]
    fn empty_reporter() {
        let reporter = UnmatchedReporter::new();
        assert_eq!(reporter.count(), 0);
        reporter.log_summary();
    }
}
