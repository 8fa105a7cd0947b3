//! Run configuration for the provider geography mapping job.
//! District and ward rows are fetched and updated scoped by this provider id.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::env;

use crate::utils::constants::DEFAULT_PROVIDER_ID;
use crate::utils::db_connect::PgPool;

#[derive(Debug, Clone)]
pub struct MappingConfig {
    pub provider_id: i64,
}

impl MappingConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let provider_id = env::var("MAPPING_PROVIDER_ID")
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_PROVIDER_ID);

        debug!("Mapping config: provider_id={}", provider_id);

        Self { provider_id }
    }

    /// Log the current configuration
    pub fn log_config(&self) {
        info!("🔍 Mapping provider id: {}", self.provider_id);
    }

    /// Check that district/ward rows exist for the configured provider.
    /// A missing provider is not fatal, the scoped stages just process
    /// zero rows, but it almost always means a misconfigured id.
    pub async fn validate_provider(&self, pool: &PgPool) -> Result<()> {
        let conn = pool
            .get()
            .await
            .context("Failed to get DB connection for provider validation")?;

        let row = conn
            .query_one(
                "SELECT
                    (SELECT COUNT(*) FROM provider_districts WHERE provider_id = $1) AS districts,
                    (SELECT COUNT(*) FROM provider_wards WHERE provider_id = $1) AS wards",
                &[&self.provider_id],
            )
            .await
            .context("Failed to validate provider id")?;

        let districts: i64 = row.get("districts");
        let wards: i64 = row.get("wards");

        if districts == 0 && wards == 0 {
            warn!(
                "⚠️ No provider district/ward rows found for provider id {}. \
                 The scoped stages will process zero rows. Check MAPPING_PROVIDER_ID \
                 and whether the upstream ingestion ran.",
                self.provider_id
            );
        } else {
            info!(
                "✅ Provider {} has {} district rows and {} ward rows awaiting mapping",
                self.provider_id, districts, wards
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test because std::env is process-global and tests run in parallel.
    #[test]
    fn test_provider_id_from_env() {
        env::remove_var("MAPPING_PROVIDER_ID");
        assert_eq!(MappingConfig::from_env().provider_id, DEFAULT_PROVIDER_ID);

        env::set_var("MAPPING_PROVIDER_ID", "7");
        assert_eq!(MappingConfig::from_env().provider_id, 7);

        env::set_var("MAPPING_PROVIDER_ID", "not a number");
        assert_eq!(MappingConfig::from_env().provider_id, DEFAULT_PROVIDER_ID);
        env::remove_var("MAPPING_PROVIDER_ID");
    }
}
