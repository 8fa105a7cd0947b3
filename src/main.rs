use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use region_matching_lib::matching::db::reset_provider_tables;
use region_matching_lib::matching::manager::run_mapping_pipeline;
use region_matching_lib::utils::db_connect::connect;
use region_matching_lib::utils::env::load_env;
use region_matching_lib::utils::mapping_config::MappingConfig;
use std::time::Instant;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging and environment
    env_logger::init();
    info!("Starting provider geography mapping job");
    load_env();

    let config = MappingConfig::from_env();
    config.log_config();

    let run_id = Uuid::new_v4().to_string();
    let run_timestamp = Utc::now().naive_utc();
    info!("Run ID: {} (started {})", run_id, run_timestamp);

    let pool = connect().await.context("Failed to connect to database")?;
    info!("Successfully connected to the database");

    config
        .validate_provider(&pool)
        .await
        .context("Failed to validate provider configuration")?;

    let run_start = Instant::now();

    // The provider tables are cleared first; upstream ingestion repopulates
    // them before the stages resolve and annotate the rows.
    reset_provider_tables(&pool)
        .await
        .context("Failed to reset provider tables")?;

    let (level_stats, reporter) = run_mapping_pipeline(&pool, &config)
        .await
        .context("Mapping pipeline failed")?;

    let total_time = run_start.elapsed();

    info!("=== Mapping Summary ===");
    info!("Run ID: {}", run_id);
    info!("Provider id: {}", config.provider_id);
    for stats in &level_stats {
        info!(
            "{}: {} processed, {} matched, {} unmatched ({:.2?})",
            stats.level, stats.processed, stats.matched, stats.unmatched, stats.duration
        );
    }
    let total_matched: usize = level_stats.iter().map(|s| s.matched).sum();
    let total_unmatched: usize = level_stats.iter().map(|s| s.unmatched).sum();
    info!(
        "Totals: {} matched, {} unmatched in {:.2?}",
        total_matched, total_unmatched, total_time
    );

    reporter.log_summary();

    info!("🎉 Mapping completed successfully!");
    Ok(())
}
