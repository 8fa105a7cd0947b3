// src/matching/db.rs - Store access for the mapping job

use anyhow::{Context, Result};
use log::{info, warn};
use tokio_postgres::types::ToSql;
use tokio_postgres::GenericClient;

use crate::models::core::{CanonicalRegion, GeoLevel, ProviderRegion};
use crate::utils::db_connect::PgPool;

/// Deletes all rows from the three provider tables in one committed
/// transaction. The upstream ingestion step is expected to repopulate them
/// before the stages run; this mirrors the production reset-and-rebuild
/// sequence.
pub async fn reset_provider_tables(pool: &PgPool) -> Result<()> {
    info!("🧹 Clearing provider geography tables before mapping...");
    let mut conn = pool
        .get()
        .await
        .context("Failed to get DB connection for reset")?;
    let tx = conn
        .transaction()
        .await
        .context("Failed to open reset transaction")?;
    tx.execute("DELETE FROM provider_provinces", &[])
        .await
        .context("Failed to clear provider_provinces")?;
    tx.execute("DELETE FROM provider_districts", &[])
        .await
        .context("Failed to clear provider_districts")?;
    tx.execute("DELETE FROM provider_wards", &[])
        .await
        .context("Failed to clear provider_wards")?;
    tx.commit().await.context("Failed to commit reset")?;
    info!("Provider geography tables cleared");
    Ok(())
}

/// Loads the canonical reference rows for one level, in id order. The pool
/// ordering is what makes tie-breaks deterministic, so the ORDER BY stays.
pub async fn load_canonical_regions(
    client: &impl GenericClient,
    level: GeoLevel,
) -> Result<Vec<CanonicalRegion>> {
    let query = match level {
        GeoLevel::Province => "SELECT id, name FROM provinces ORDER BY id",
        GeoLevel::District => "SELECT id, name FROM districts ORDER BY id",
        GeoLevel::Ward => "SELECT id, name FROM wards ORDER BY id",
    };
    let rows = client
        .query(query, &[])
        .await
        .with_context(|| format!("Failed to load canonical {} pool", level))?;

    let regions: Vec<CanonicalRegion> = rows
        .iter()
        .map(|row| CanonicalRegion {
            id: row.get("id"),
            name: row.get("name"),
        })
        .collect();

    if regions.is_empty() {
        warn!(
            "⚠️ Canonical {} table is empty; every provider row in this stage will be unmatched",
            level
        );
    }
    Ok(regions)
}

/// Loads the provider rows awaiting resolution for one level. Province rows
/// are unscoped; district and ward rows are filtered by the provider id set
/// during upstream ingestion.
pub async fn load_provider_rows(
    client: &impl GenericClient,
    level: GeoLevel,
    provider_id: i64,
) -> Result<Vec<ProviderRegion>> {
    let rows = match level {
        GeoLevel::Province => {
            client
                .query(
                    "SELECT id, provider_province_name FROM provider_provinces ORDER BY id",
                    &[],
                )
                .await
        }
        GeoLevel::District => {
            client
                .query(
                    "SELECT provider_id, district_id, provider_district_name
                     FROM provider_districts WHERE provider_id = $1 ORDER BY district_id",
                    &[&provider_id],
                )
                .await
        }
        GeoLevel::Ward => {
            client
                .query(
                    "SELECT provider_id, ward_id, provider_ward_name
                     FROM provider_wards WHERE provider_id = $1 ORDER BY ward_id",
                    &[&provider_id],
                )
                .await
        }
    }
    .with_context(|| format!("Failed to load provider {} rows", level))?;

    let provider_rows = rows
        .iter()
        .map(|row| match level {
            GeoLevel::Province => ProviderRegion {
                external_name: row.get("provider_province_name"),
                update_keys: vec![row.get("id")],
            },
            GeoLevel::District => ProviderRegion {
                external_name: row.get("provider_district_name"),
                update_keys: vec![row.get("provider_id"), row.get("district_id")],
            },
            GeoLevel::Ward => ProviderRegion {
                external_name: row.get("provider_ward_name"),
                update_keys: vec![row.get("provider_id"), row.get("ward_id")],
            },
        })
        .collect();
    Ok(provider_rows)
}

/// Writes an accepted canonical id onto one provider row. `update_keys`
/// are bound after the canonical id, in the order the statement expects:
/// `[id]` for provinces, `[provider_id, district_id|ward_id]` otherwise,
/// so updates never cross provider boundaries.
pub async fn persist_mapping(
    client: &impl GenericClient,
    level: GeoLevel,
    canonical_id: i64,
    update_keys: &[i64],
) -> Result<u64> {
    let query = match level {
        GeoLevel::Province => "UPDATE provider_provinces SET province_id = $1 WHERE id = $2",
        GeoLevel::District => {
            "UPDATE provider_districts SET local_district_id = $1
             WHERE provider_id = $2 AND district_id = $3"
        }
        GeoLevel::Ward => {
            "UPDATE provider_wards SET local_ward_id = $1
             WHERE provider_id = $2 AND ward_id = $3"
        }
    };

    let mut params: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(1 + update_keys.len());
    params.push(&canonical_id);
    for key in update_keys {
        params.push(key);
    }

    client
        .execute(query, &params)
        .await
        .with_context(|| format!("Failed to persist {} mapping", level))
}
