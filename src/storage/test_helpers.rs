//! Shared test helpers for database-backed tests.
//!
//! Provides in-memory pool setup and reference-dataset seeding used across
//! the storage, catalog, groups and generate modules.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::storage::run_migrations;

/// Creates a test database pool with migrations applied.
///
/// Uses a single-connection in-memory database: each SQLite connection gets
/// its own `:memory:` instance, so the pool must not open a second one.
/// Foreign keys are enabled to match the production pool.
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Inserts one reference record into the test dataset.
pub async fn seed_ip_record(
    pool: &SqlitePool,
    min_ip: u32,
    max_ip: u32,
    country: &str,
    province: &str,
    city: &str,
    isp: &str,
) {
    sqlx::query(
        "INSERT INTO ip_records (minip, maxip, country, province, city, isp)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(min_ip as i64)
    .bind(max_ip as i64)
    .bind(country)
    .bind(province)
    .bind(city)
    .bind(isp)
    .execute(pool)
    .await
    .expect("Failed to insert test reference record");
}
