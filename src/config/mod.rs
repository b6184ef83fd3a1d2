//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (target country, import batch sizes, etc.)
//! - CLI option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{LogFormat, LogLevel};
