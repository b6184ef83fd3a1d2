//! CIDR generation service.
//!
//! Re-derives, on demand, the CIDR list backing each routing group: for
//! every region the group owns, the matching reference records are looked up
//! (honoring the group's carrier filter) and each address range is run
//! through the decomposer. Identical blocks from distinct records are
//! deduplicated by first occurrence.

use std::collections::HashSet;
use std::sync::Arc;

use log::debug;
use sqlx::SqlitePool;

use crate::cidr::range_to_cidrs;
use crate::config::TARGET_COUNTRY;
use crate::error_handling::GroupError;
use crate::groups::GroupStore;
use crate::storage::records;

/// The generated output for one group: its name and the newline-joined CIDR
/// list, ready for the artifact consumer (file write, download, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupArtifact {
    pub group_name: String,
    pub content: String,
}

/// Builds per-group CIDR lists from the reference dataset.
#[derive(Clone)]
pub struct CidrGenerator {
    pool: Arc<SqlitePool>,
    store: GroupStore,
}

impl CidrGenerator {
    /// Creates a generator over the given pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        let store = GroupStore::new(Arc::clone(&pool));
        CidrGenerator { pool, store }
    }

    /// Generates the deduplicated CIDR list for one group.
    ///
    /// Blocks appear in the order they are produced (regions in the group's
    /// stored order, records per region, blocks ascending within a record);
    /// duplicates keep their first occurrence. A region with no matching
    /// reference records contributes nothing -- sparse coverage is a valid
    /// state, not an error.
    ///
    /// Fails with [`GroupError::NotFound`] if the group does not exist.
    pub async fn generate_for_group(&self, id: &str) -> Result<Vec<String>, GroupError> {
        let group = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| GroupError::NotFound(id.to_string()))?;

        let mut seen = HashSet::new();
        let mut cidrs = Vec::new();
        for region in &group.regions {
            let records = records::ranges_for_region(
                &self.pool,
                TARGET_COUNTRY,
                &region.province,
                &region.city,
                &group.isp,
            )
            .await?;
            debug!(
                "group {:?}: region {} matched {} reference records",
                group.name,
                region,
                records.len()
            );

            for record in &records {
                for block in range_to_cidrs(record.min_ip, record.max_ip)? {
                    let cidr = block.to_string();
                    if seen.insert(cidr.clone()) {
                        cidrs.push(cidr);
                    }
                }
            }
        }

        Ok(cidrs)
    }

    /// Generates artifacts for every group, newest group first.
    pub async fn generate_all(&self) -> Result<Vec<GroupArtifact>, GroupError> {
        let groups = self.store.list_all().await?;
        let mut artifacts = Vec::with_capacity(groups.len());
        for group in groups {
            let cidrs = self.generate_for_group(&group.id).await?;
            artifacts.push(GroupArtifact {
                group_name: group.name,
                content: cidrs.join("\n"),
            });
        }
        Ok(artifacts)
    }
}
