//! Database connection pool management.
//!
//! This module initializes and configures the SQLite connection pool with:
//! - WAL mode enabled for concurrent readers
//! - Foreign-key enforcement on every connection (the cascading delete of
//!   region assignments depends on it)
//! - Automatic database file creation

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use log::{error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::error_handling::DatabaseError;

/// Initializes and returns a database connection pool for the given path.
///
/// Creates the database file if it doesn't exist, enables WAL mode, and
/// turns on foreign-key enforcement. The path is passed explicitly rather
/// than read from the environment so library callers control the lifecycle.
pub async fn init_db_pool_with_path(db_path: &Path) -> Result<Arc<Pool<Sqlite>>, DatabaseError> {
    match OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .open(db_path)
    {
        Ok(_) => info!("Database file created successfully."),
        Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
            info!("Database file already exists.")
        }
        Err(e) => {
            error!("Failed to create database file: {e}");
            return Err(DatabaseError::FileCreationError(e.to_string()));
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            DatabaseError::SqlError(e)
        })?;

    Ok(Arc::new(pool))
}
