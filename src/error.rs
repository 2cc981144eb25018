//! Error types for the scheduling engine
//!
//! Overlap conflicts are not represented here: they are advisory and are
//! returned as `ConflictDescription` values instead.

use thiserror::Error;

/// Errors raised by the scheduling engine and the project collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Input is not a well-formed `YYYY-MM-DD` day, or encodes an impossible date
    #[error("Invalid date format '{0}'. Use YYYY-MM-DD (e.g., '2025-03-15')")]
    InvalidDateFormat(String),

    /// A range required by the operation is absent
    #[error("Missing required range: {0}")]
    MissingRequiredRange(String),

    /// A range ends before it starts, or phases are out of order
    #[error("Order violation: {0}")]
    OrderViolation(String),

    /// A derived or shifted day falls outside the years that can be stored
    #[error("Date {0} is outside the supported range 1900-01-01 to 2100-12-31")]
    OutOfRange(String),

    #[error("Duplicate ID error: project '{0}' already exists")]
    DuplicateId(String),

    #[error("Project '{0}' not found")]
    NotFound(String),
}

/// Result type alias for scheduling operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
