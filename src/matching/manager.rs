// src/matching/manager.rs - Three-stage hierarchical mapping coordinator

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::time::Instant;
use tokio_postgres::GenericClient;

use crate::matching::db;
use crate::matching::normalize::clean_prefix;
use crate::matching::similarity::{match_one, CandidatePool};
use crate::matching::unmatched::UnmatchedReporter;
use crate::models::core::{GeoLevel, LevelStats, MappingResult, ProviderRegion};
use crate::utils::db_connect::PgPool;
use crate::utils::mapping_config::MappingConfig;

/// Stage execution order. Province first, then the provider-scoped levels;
/// district and ward rows are assumed to carry their provider id from
/// upstream ingestion, and no stage consumes another stage's results.
const STAGE_ORDER: [GeoLevel; 3] = [GeoLevel::Province, GeoLevel::District, GeoLevel::Ward];

/// Prepares the needle for one provider row. Only the ward level applies
/// prefix cleaning and case folding; province and district names are
/// matched as supplied.
fn needle_for(level: GeoLevel, external_name: &str) -> String {
    match level {
        GeoLevel::Ward => clean_prefix(external_name).to_uppercase(),
        _ => external_name.to_string(),
    }
}

/// Resolves every provider row against the candidate pool for one level.
/// Pure with respect to the store: rows in, one [`MappingResult`] per row
/// out, in input order. The pool is fixed for the whole pass, so repeated
/// invocations over the same inputs yield identical results.
pub fn resolve_rows(
    rows: &[ProviderRegion],
    pool: &CandidatePool,
    level: GeoLevel,
) -> Vec<MappingResult> {
    rows.iter()
        .map(|row| {
            let needle = needle_for(level, &row.external_name);
            let outcome = match_one(&needle, pool.names(), level.threshold());
            match outcome.index {
                Some(idx) => MappingResult {
                    canonical_id: Some(pool.id_at(idx)),
                    score: outcome.score,
                    accepted: true,
                },
                None => MappingResult {
                    canonical_id: None,
                    score: outcome.score,
                    accepted: false,
                },
            }
        })
        .collect()
}

fn stage_progress_bar(level: GeoLevel, total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  {spinner:.blue} [{elapsed_precise}] {bar:30.green/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▉▊▋▌▍▎▏  "),
    );
    pb.set_message(format!("Mapping {} rows", level));
    pb
}

/// Runs one mapping stage against `client` (normally a stage transaction):
/// load pool, load rows, resolve, then persist accepted ids and report the
/// rest. A persistence failure propagates and aborts the remaining rows of
/// the stage.
pub async fn run_stage(
    client: &impl GenericClient,
    level: GeoLevel,
    provider_id: i64,
    reporter: &mut UnmatchedReporter,
) -> Result<LevelStats> {
    let stage_start = Instant::now();
    info!("🔍 Mapping {}...", level);

    let regions = db::load_canonical_regions(client, level).await?;
    let pool = CandidatePool::new(level, regions);
    let rows = db::load_provider_rows(client, level, provider_id).await?;
    info!(
        "{}: {} provider rows against {} candidates (threshold {})",
        level,
        rows.len(),
        pool.len(),
        level.threshold()
    );

    let pb = stage_progress_bar(level, rows.len() as u64);
    let results = resolve_rows(&rows, &pool, level);

    let mut stats = LevelStats::new(level);
    for (row, result) in rows.iter().zip(results.iter()) {
        stats.processed += 1;
        match result.canonical_id {
            Some(canonical_id) => {
                db::persist_mapping(client, level, canonical_id, &row.update_keys).await?;
                stats.matched += 1;
            }
            None => {
                reporter.record(level, &row.external_name, result.score);
                stats.unmatched += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    stats.duration = stage_start.elapsed();
    info!(
        "{} stage complete: {} processed, {} matched, {} unmatched in {:.2?}",
        level, stats.processed, stats.matched, stats.unmatched, stats.duration
    );
    Ok(stats)
}

/// Drives the three stages in fixed order, each inside its own
/// transaction so a crash mid-stage rolls that stage back cleanly.
pub async fn run_mapping_pipeline(
    pg_pool: &PgPool,
    config: &MappingConfig,
) -> Result<(Vec<LevelStats>, UnmatchedReporter)> {
    let mut reporter = UnmatchedReporter::new();
    let mut all_stats = Vec::with_capacity(STAGE_ORDER.len());

    for level in STAGE_ORDER {
        let mut conn = pg_pool
            .get()
            .await
            .with_context(|| format!("Failed to get DB connection for {} stage", level))?;
        let tx = conn
            .transaction()
            .await
            .with_context(|| format!("Failed to open {} stage transaction", level))?;
        let stats = run_stage(&tx, level, config.provider_id, &mut reporter).await?;
        tx.commit()
            .await
            .with_context(|| format!("Failed to commit {} stage", level))?;
        all_stats.push(stats);
    }

    Ok((all_stats, reporter))
}
