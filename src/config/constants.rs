//! Configuration constants.

/// Default SQLite database path, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "./georoute.db";

/// Country whose regions are offered for assignment. The reference dataset
/// is worldwide, but routing groups are only built for this country.
pub const TARGET_COUNTRY: &str = "China";

/// Rows per transaction during bulk dataset import.
pub const IMPORT_BATCH_SIZE: usize = 10_000;

/// Import progress is logged at most once per this many seconds.
pub const IMPORT_LOG_INTERVAL_SECS: u64 = 5;

/// ISPs with fewer reference records than this are dropped from the ISP
/// listing; tiny carriers and placeholder values are noise in the picker.
pub const ISP_MIN_RECORDS: i64 = 100;
