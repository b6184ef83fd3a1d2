// error_handling/mod.rs
// Error types used across the crate

mod types;

pub use types::{CidrError, DatabaseError, GroupError, InitializationError, ParseOriginError};
