//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use thiserror::Error;

use crate::models::Origin;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for database setup.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Error types for address parsing and range decomposition.
///
/// The codec and the decomposer validate eagerly: either call fails before
/// producing any output, so callers never see a partial block list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidrError {
    /// The input is not a dotted-decimal IPv4 address.
    ///
    /// Covers wrong octet count, non-numeric octets, and octets outside
    /// `[0, 255]`. Out-of-range octets are a hard error, never silently
    /// wrapped into the address.
    #[error("invalid IPv4 address: {0:?}")]
    InvalidAddress(String),

    /// A range was given with its start above its end.
    #[error("invalid address range: start {start} is above end {end}")]
    InvalidRange {
        /// Numeric start of the rejected range.
        start: u32,
        /// Numeric end of the rejected range.
        end: u32,
    },
}

/// A string did not name a known origin.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown origin: {0:?} (expected HKG, JPN or SIN)")]
pub struct ParseOriginError(pub String);

/// Error types for routing group operations and CIDR generation.
#[derive(Error, Debug)]
pub enum GroupError {
    /// The addressed routing group does not exist.
    #[error("routing group not found: {0}")]
    NotFound(String),

    /// A create/update collided with existing region ownership.
    ///
    /// The whole transaction was rolled back; the caller's group and region
    /// rows were not persisted. The already-taken regions are not enumerated
    /// here -- callers re-query the region catalog to discover them.
    #[error("regions requested for group {name:?} are already assigned under origin {origin}")]
    RegionConflict {
        /// Origin under which the collision occurred.
        origin: Origin,
        /// Name the caller tried to save the group under.
        name: String,
    },

    /// Underlying SQL error.
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    /// A reference record held an invalid address range.
    #[error(transparent)]
    Cidr(#[from] CidrError),
}
