// storage/mod.rs
// Database operations module

pub mod import;
pub mod migrations;
pub mod pool;
pub mod records;

#[cfg(test)]
pub mod test_helpers;

// Re-export commonly used items
pub use import::{import_dataset, ImportReport};
pub use migrations::run_migrations;
pub use pool::init_db_pool_with_path;
