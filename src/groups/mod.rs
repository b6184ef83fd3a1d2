//! Routing group store.
//!
//! Owns the group lifecycle and the exclusivity invariant: under a given
//! origin, each `(province, city)` region belongs to at most one group. The
//! invariant is enforced by the composite primary key on `group_regions`,
//! and every mutation runs inside a single transaction so a collision
//! leaves no partial state behind -- either the group and all its region
//! rows commit together, or nothing does.

use std::sync::Arc;

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error_handling::GroupError;
use crate::models::{Origin, Region, RouteGroup};

/// Validated payload for creating a routing group.
#[derive(Debug, Clone)]
pub struct CreateGroupRequest {
    pub name: String,
    /// Exact-match carrier filter; empty matches any carrier.
    pub isp: String,
    pub origin: Origin,
    pub regions: Vec<Region>,
}

/// Validated payload for updating a routing group.
///
/// The origin is deliberately absent: it is fixed at creation. The region
/// set replaces the group's previous assignments wholesale.
#[derive(Debug, Clone)]
pub struct UpdateGroupRequest {
    pub name: String,
    pub isp: String,
    pub regions: Vec<Region>,
}

/// Store for routing groups and their region assignments.
#[derive(Clone)]
pub struct GroupStore {
    pool: Arc<SqlitePool>,
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

impl GroupStore {
    /// Creates a store over the given pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        GroupStore { pool }
    }

    /// Creates a group and assigns it all requested regions atomically.
    ///
    /// If any requested region is already owned by another group under the
    /// same origin, the whole transaction rolls back and the call fails with
    /// [`GroupError::RegionConflict`]. The error does not enumerate the
    /// colliding regions; callers re-query the catalog for that.
    pub async fn create(&self, req: CreateGroupRequest) -> Result<RouteGroup, GroupError> {
        let id = Uuid::new_v4().to_string();

        let mut tx = self.pool.begin().await?;
        sqlx::query("INSERT INTO route_groups (id, name, isp, origin) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(&req.name)
            .bind(&req.isp)
            .bind(req.origin.as_str())
            .execute(&mut *tx)
            .await?;

        for region in &req.regions {
            sqlx::query(
                "INSERT INTO group_regions (group_id, origin, province, city) VALUES (?, ?, ?, ?)",
            )
            .bind(&id)
            .bind(req.origin.as_str())
            .bind(&region.province)
            .bind(&region.city)
            .execute(&mut *tx)
            .await
            .map_err(|e| Self::map_assignment_error(e, req.origin, &req.name))?;
        }
        tx.commit().await?;

        self.get(&id)
            .await?
            .ok_or_else(|| GroupError::NotFound(id))
    }

    /// Updates a group's name, carrier filter and region set atomically.
    ///
    /// The existing assignments are replaced wholesale; new regions are
    /// inserted under the group's original origin, which never changes.
    /// Collision semantics match [`GroupStore::create`].
    pub async fn update(&self, id: &str, req: UpdateGroupRequest) -> Result<RouteGroup, GroupError> {
        let existing = self
            .get(id)
            .await?
            .ok_or_else(|| GroupError::NotFound(id.to_string()))?;

        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE route_groups SET name = ?, isp = ? WHERE id = ?")
            .bind(&req.name)
            .bind(&req.isp)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM group_regions WHERE group_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for region in &req.regions {
            sqlx::query(
                "INSERT INTO group_regions (group_id, origin, province, city) VALUES (?, ?, ?, ?)",
            )
            .bind(id)
            .bind(existing.origin.as_str())
            .bind(&region.province)
            .bind(&region.city)
            .execute(&mut *tx)
            .await
            .map_err(|e| Self::map_assignment_error(e, existing.origin, &req.name))?;
        }
        tx.commit().await?;

        self.get(id)
            .await?
            .ok_or_else(|| GroupError::NotFound(id.to_string()))
    }

    /// Deletes a group; its region assignments are removed by the cascading
    /// foreign key in the same transaction, immediately freeing the regions.
    /// Deleting an unknown id is a no-op.
    pub async fn delete(&self, id: &str) -> Result<(), GroupError> {
        sqlx::query("DELETE FROM route_groups WHERE id = ?")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }

    /// Fetches one group with its regions, or `None` if the id is unknown.
    pub async fn get(&self, id: &str) -> Result<Option<RouteGroup>, GroupError> {
        let row = sqlx::query(
            "SELECT id, name, isp, origin, created_at FROM route_groups WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(self.hydrate_group(&row).await?))
    }

    /// Lists all groups with their regions, newest first.
    pub async fn list_all(&self) -> Result<Vec<RouteGroup>, GroupError> {
        let rows = sqlx::query(
            "SELECT id, name, isp, origin, created_at
             FROM route_groups
             ORDER BY created_at DESC, id",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut groups = Vec::with_capacity(rows.len());
        for row in &rows {
            groups.push(self.hydrate_group(row).await?);
        }
        Ok(groups)
    }

    async fn hydrate_group(&self, row: &sqlx::sqlite::SqliteRow) -> Result<RouteGroup, GroupError> {
        let id: String = row.get("id");
        let origin: String = row.get("origin");
        let origin = origin
            .parse::<Origin>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        let region_rows = sqlx::query(
            "SELECT province, city FROM group_regions WHERE group_id = ? ORDER BY province, city",
        )
        .bind(&id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(RouteGroup {
            id,
            name: row.get("name"),
            isp: row.get("isp"),
            origin,
            created_at: row.get("created_at"),
            regions: region_rows
                .iter()
                .map(|r| Region {
                    province: r.get("province"),
                    city: r.get("city"),
                })
                .collect(),
        })
    }

    fn map_assignment_error(err: sqlx::Error, origin: Origin, name: &str) -> GroupError {
        if is_unique_violation(&err) {
            GroupError::RegionConflict {
                origin,
                name: name.to_string(),
            }
        } else {
            GroupError::Sql(err)
        }
    }
}
