//! Bulk import of the vendor IP geolocation dataset.
//!
//! The vendor file is tab-separated with every field wrapped in double
//! quotes, CRLF line endings, and a header row. Of the nineteen columns only
//! the address range and the location/carrier columns are kept; the rest
//! (coordinates, AS numbers, timezones) are not used by CIDR generation.
//!
//! Import rebuilds the `ip_records` table only. Routing groups and their
//! region assignments survive a re-import so a dataset refresh cannot
//! destroy operator state. Range indexes are dropped before the bulk load
//! and rebuilt afterwards.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, warn};
use sqlx::SqlitePool;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::{IMPORT_BATCH_SIZE, IMPORT_LOG_INTERVAL_SECS};

// Column positions in the vendor TSV (column 0 is the vendor's row id).
const COL_MIN_IP: usize = 1;
const COL_MAX_IP: usize = 2;
const COL_COUNTRY: usize = 6;
const COL_PROVINCE: usize = 7;
const COL_CITY: usize = 8;
const COL_ISP: usize = 14;
const MIN_COLUMNS: usize = 15;

/// Summary of a completed dataset import.
#[derive(Debug, Clone, Copy)]
pub struct ImportReport {
    /// Rows inserted into `ip_records`.
    pub imported: u64,
    /// Malformed rows that were skipped.
    pub skipped: u64,
    /// Wall-clock duration of the import in seconds.
    pub elapsed_seconds: f64,
}

struct ParsedRow {
    min_ip: u32,
    max_ip: u32,
    country: String,
    province: String,
    city: String,
    isp: String,
}

fn unquote(field: &str) -> &str {
    field.trim().trim_matches('"')
}

fn parse_line(line: &str) -> Option<ParsedRow> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_COLUMNS {
        return None;
    }

    let min_ip: u32 = unquote(fields[COL_MIN_IP]).parse().ok()?;
    let max_ip: u32 = unquote(fields[COL_MAX_IP]).parse().ok()?;
    if min_ip > max_ip {
        return None;
    }

    Some(ParsedRow {
        min_ip,
        max_ip,
        country: unquote(fields[COL_COUNTRY]).to_string(),
        province: unquote(fields[COL_PROVINCE]).to_string(),
        city: unquote(fields[COL_CITY]).to_string(),
        isp: unquote(fields[COL_ISP]).to_string(),
    })
}

async fn flush_batch(pool: &SqlitePool, batch: &mut Vec<ParsedRow>) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for row in batch.iter() {
        sqlx::query(
            "INSERT INTO ip_records (minip, maxip, country, province, city, isp)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(row.min_ip as i64)
        .bind(row.max_ip as i64)
        .bind(&row.country)
        .bind(&row.province)
        .bind(&row.city)
        .bind(&row.isp)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    batch.clear();
    Ok(())
}

/// Imports the vendor TSV at `path`, replacing the current reference
/// dataset.
///
/// Rows are inserted in batched transactions of `IMPORT_BATCH_SIZE`;
/// progress is logged periodically. Rows with too few columns, unparsable
/// addresses, or an inverted range are counted and skipped.
pub async fn import_dataset(pool: &SqlitePool, path: &Path) -> Result<ImportReport> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open dataset file {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    info!("Clearing previous reference dataset");
    sqlx::query("DROP INDEX IF EXISTS idx_ip_records_region")
        .execute(pool)
        .await?;
    sqlx::query("DROP INDEX IF EXISTS idx_ip_records_range")
        .execute(pool)
        .await?;
    sqlx::query("DELETE FROM ip_records").execute(pool).await?;

    let start = Instant::now();
    let mut last_report = Instant::now();
    let mut batch: Vec<ParsedRow> = Vec::with_capacity(IMPORT_BATCH_SIZE);
    let mut imported: u64 = 0;
    let mut skipped: u64 = 0;
    let mut is_header = true;

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read line from dataset file")?
    {
        // Vendor file uses CRLF; tokio strips only the newline
        let line = line.trim_end_matches('\r');
        if is_header {
            is_header = false;
            continue;
        }
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Some(row) => {
                batch.push(row);
                imported += 1;
            }
            None => {
                skipped += 1;
                continue;
            }
        }

        if batch.len() >= IMPORT_BATCH_SIZE {
            flush_batch(pool, &mut batch)
                .await
                .context("Failed to insert dataset batch")?;

            if last_report.elapsed() >= Duration::from_secs(IMPORT_LOG_INTERVAL_SECS) {
                let rate = imported as f64 / start.elapsed().as_secs_f64();
                info!("Imported {} rows ({:.0} rows/s)", imported, rate);
                last_report = Instant::now();
            }
        }
    }

    if !batch.is_empty() {
        flush_batch(pool, &mut batch)
            .await
            .context("Failed to insert final dataset batch")?;
    }

    info!("Rebuilding dataset indexes");
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_ip_records_region
         ON ip_records (country, province, city, isp)",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_ip_records_range
         ON ip_records (minip, maxip)",
    )
    .execute(pool)
    .await?;

    let elapsed_seconds = start.elapsed().as_secs_f64();
    info!(
        "Import finished: {} rows in {:.1}s ({} skipped)",
        imported, elapsed_seconds, skipped
    );
    if skipped > 0 {
        warn!("Skipped {} malformed dataset rows", skipped);
    }

    Ok(ImportReport {
        imported,
        skipped,
        elapsed_seconds,
    })
}
