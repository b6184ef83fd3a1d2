//! georoute library: geographic IP space assignment and CIDR generation.
//!
//! This library assigns regions of a country's IP address space (derived
//! from a vendor geolocation dataset) to named routing groups and emits,
//! per group, the minimal exact set of CIDR blocks covering the assigned
//! ranges. Region ownership is exclusive per origin: under a given launch
//! point, each `(province, city)` region belongs to at most one group,
//! enforced atomically at assignment time.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use georoute::{
//!     init_db_pool_with_path, run_migrations, CidrGenerator, CreateGroupRequest, GroupStore,
//!     Origin, Region,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = init_db_pool_with_path(Path::new("./georoute.db")).await?;
//! run_migrations(&pool).await?;
//!
//! let store = GroupStore::new(Arc::clone(&pool));
//! let group = store
//!     .create(CreateGroupRequest {
//!         name: "east".into(),
//!         isp: String::new(),
//!         origin: Origin::Hkg,
//!         regions: vec![Region::new("Guangdong", "Shenzhen")],
//!     })
//!     .await?;
//!
//! let generator = CidrGenerator::new(pool);
//! for cidr in generator.generate_for_group(&group.id).await? {
//!     println!("{cidr}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

pub mod catalog;
pub mod cidr;
pub mod config;
mod error_handling;
pub mod generate;
pub mod groups;
pub mod initialization;
pub mod models;
pub mod storage;

// Re-export public API
pub use catalog::RegionCatalog;
pub use cidr::{ip_to_number, number_to_ip, range_to_cidrs, CidrBlock};
pub use error_handling::{
    CidrError, DatabaseError, GroupError, InitializationError, ParseOriginError,
};
pub use generate::{CidrGenerator, GroupArtifact};
pub use groups::{CreateGroupRequest, GroupStore, UpdateGroupRequest};
pub use models::{DatasetStats, IpRecord, Origin, Region, RegionOwnership, RouteGroup};
pub use storage::{import_dataset, init_db_pool_with_path, run_migrations, ImportReport};
