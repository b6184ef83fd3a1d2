//! Region catalog: which regions exist and who owns them.
//!
//! Regions are not stored separately; they are the distinct
//! `(province, city)` pairs observed in the reference dataset for the target
//! country, annotated here with current ownership from the group store.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::{Row, SqlitePool};

use crate::config::TARGET_COUNTRY;
use crate::models::{DatasetStats, Origin, RegionOwnership};
use crate::storage::records;

/// Read-only view over regions and their ownership.
///
/// Holds an explicit pool handle; nothing here mutates state.
#[derive(Clone)]
pub struct RegionCatalog {
    pool: Arc<SqlitePool>,
}

impl RegionCatalog {
    /// Creates a catalog over the given pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        RegionCatalog { pool }
    }

    /// Lists every region for the target country with its owner under
    /// `origin`, or `assigned_to: None` where unowned.
    ///
    /// Passing `None` for the origin is a legacy mode that merges ownership
    /// across all origins; when a region is owned under several origins an
    /// arbitrary one wins. Kept for backward compatibility only -- the
    /// exclusivity constraint is always enforced per origin.
    pub async fn list_regions(
        &self,
        origin: Option<Origin>,
    ) -> Result<Vec<RegionOwnership>, sqlx::Error> {
        let regions = records::distinct_regions(&self.pool, TARGET_COUNTRY).await?;

        let rows = match origin {
            Some(origin) => {
                sqlx::query("SELECT province, city, group_id FROM group_regions WHERE origin = ?")
                    .bind(origin.as_str())
                    .fetch_all(self.pool.as_ref())
                    .await?
            }
            None => {
                sqlx::query("SELECT province, city, group_id FROM group_regions")
                    .fetch_all(self.pool.as_ref())
                    .await?
            }
        };

        let mut owners: HashMap<(String, String), String> = HashMap::new();
        for row in rows {
            owners.insert(
                (row.get("province"), row.get("city")),
                row.get("group_id"),
            );
        }

        Ok(regions
            .into_iter()
            .map(|region| {
                let assigned_to = owners
                    .get(&(region.province.clone(), region.city.clone()))
                    .cloned();
                RegionOwnership {
                    province: region.province,
                    city: region.city,
                    assigned_to,
                }
            })
            .collect())
    }

    /// Lists carriers present for the target country, largest first.
    pub async fn list_isps(&self) -> Result<Vec<String>, sqlx::Error> {
        records::available_isps(&self.pool, TARGET_COUNTRY).await
    }

    /// Returns dataset and group counts.
    pub async fn stats(&self) -> Result<DatasetStats, sqlx::Error> {
        records::dataset_stats(&self.pool, TARGET_COUNTRY).await
    }
}
