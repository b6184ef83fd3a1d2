//! Read-only queries against the reference dataset.
//!
//! The `ip_records` table is loaded once by the bulk importer and treated as
//! immutable afterwards, so these queries need no locking beyond SQLite's
//! own reader coordination. All lookups are served by the
//! `(country, province, city, isp)` index.

use sqlx::{Row, SqlitePool};

use crate::config::ISP_MIN_RECORDS;
use crate::models::{DatasetStats, IpRecord, Region};

fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> IpRecord {
    IpRecord {
        min_ip: row.get::<i64, _>("minip") as u32,
        max_ip: row.get::<i64, _>("maxip") as u32,
        country: row.get("country"),
        province: row.get("province"),
        city: row.get("city"),
        isp: row.get("isp"),
    }
}

/// Returns every reference record for the given region, optionally narrowed
/// to one carrier. An empty `isp` matches records from any carrier.
pub async fn ranges_for_region(
    pool: &SqlitePool,
    country: &str,
    province: &str,
    city: &str,
    isp: &str,
) -> Result<Vec<IpRecord>, sqlx::Error> {
    let rows = if isp.is_empty() {
        sqlx::query(
            "SELECT minip, maxip, country, province, city, isp
             FROM ip_records
             WHERE country = ? AND province = ? AND city = ?",
        )
        .bind(country)
        .bind(province)
        .bind(city)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query(
            "SELECT minip, maxip, country, province, city, isp
             FROM ip_records
             WHERE country = ? AND province = ? AND city = ? AND isp = ?",
        )
        .bind(country)
        .bind(province)
        .bind(city)
        .bind(isp)
        .fetch_all(pool)
        .await?
    };

    Ok(rows.iter().map(row_to_record).collect())
}

/// Enumerates the distinct `(province, city)` pairs observed for a country,
/// ordered by province then city. Rows without a province are dataset noise
/// and are excluded.
pub async fn distinct_regions(
    pool: &SqlitePool,
    country: &str,
) -> Result<Vec<Region>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT DISTINCT province, city
         FROM ip_records
         WHERE country = ? AND province != ''
         ORDER BY province, city",
    )
    .bind(country)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| Region {
            province: row.get("province"),
            city: row.get("city"),
        })
        .collect())
}

/// Lists the carriers present for a country, largest first.
///
/// Placeholder values (empty, `"-"`) and carriers below `ISP_MIN_RECORDS`
/// are filtered out.
pub async fn available_isps(pool: &SqlitePool, country: &str) -> Result<Vec<String>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT isp, COUNT(*) as count
         FROM ip_records
         WHERE country = ? AND isp != '' AND isp != '-'
         GROUP BY isp
         HAVING count > ?
         ORDER BY count DESC",
    )
    .bind(country)
    .bind(ISP_MIN_RECORDS)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(|row| row.get("isp")).collect())
}

/// Returns summary counts over the dataset and the group store.
pub async fn dataset_stats(pool: &SqlitePool, country: &str) -> Result<DatasetStats, sqlx::Error> {
    let total_records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ip_records")
        .fetch_one(pool)
        .await?;
    let country_records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ip_records WHERE country = ?")
        .bind(country)
        .fetch_one(pool)
        .await?;
    let group_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM route_groups")
        .fetch_one(pool)
        .await?;

    Ok(DatasetStats {
        total_records,
        country_records,
        group_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::{create_test_pool, seed_ip_record};

    #[tokio::test]
    async fn test_ranges_for_region_isp_filter() {
        let pool = create_test_pool().await;
        seed_ip_record(&pool, 100, 199, "China", "Guangdong", "Shenzhen", "China Telecom").await;
        seed_ip_record(&pool, 200, 299, "China", "Guangdong", "Shenzhen", "China Unicom").await;
        seed_ip_record(&pool, 300, 399, "China", "Guangdong", "Guangzhou", "China Telecom").await;

        let telecom =
            ranges_for_region(&pool, "China", "Guangdong", "Shenzhen", "China Telecom")
                .await
                .unwrap();
        assert_eq!(telecom.len(), 1);
        assert_eq!(telecom[0].min_ip, 100);

        // Empty ISP matches any carrier
        let any = ranges_for_region(&pool, "China", "Guangdong", "Shenzhen", "")
            .await
            .unwrap();
        assert_eq!(any.len(), 2);

        let none = ranges_for_region(&pool, "China", "Guangdong", "Shenzhen", "China Mobile")
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_distinct_regions_dedupes_and_orders() {
        let pool = create_test_pool().await;
        seed_ip_record(&pool, 1, 2, "China", "Zhejiang", "Hangzhou", "China Telecom").await;
        seed_ip_record(&pool, 3, 4, "China", "Zhejiang", "Hangzhou", "China Unicom").await;
        seed_ip_record(&pool, 5, 6, "China", "Anhui", "", "China Telecom").await;
        // Missing province and foreign rows are excluded
        seed_ip_record(&pool, 7, 8, "China", "", "", "China Telecom").await;
        seed_ip_record(&pool, 9, 10, "Japan", "Tokyo", "", "NTT").await;

        let regions = distinct_regions(&pool, "China").await.unwrap();
        assert_eq!(
            regions,
            vec![
                Region::new("Anhui", ""),
                Region::new("Zhejiang", "Hangzhou"),
            ]
        );
    }

    #[tokio::test]
    async fn test_dataset_stats() {
        let pool = create_test_pool().await;
        seed_ip_record(&pool, 1, 2, "China", "Anhui", "", "China Telecom").await;
        seed_ip_record(&pool, 3, 4, "Japan", "Tokyo", "", "NTT").await;

        let stats = dataset_stats(&pool, "China").await.unwrap();
        assert_eq!(stats.total_records, 2);
        assert_eq!(stats.country_records, 1);
        assert_eq!(stats.group_count, 0);
    }
}
