//! Error types for overlap-engine boundary operations.
//!
//! The core interval, resolver, and aggregation functions are total. Errors
//! come from the import/export boundary and from calendar-key parsing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlapError {
    /// The document was not valid JSON or was missing a required field.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported schema version: {0} (expected 1)")]
    UnsupportedSchema(u32),

    #[error("Invalid day key: '{0}' (expected YYYY-MM-DD)")]
    InvalidDayKey(String),

    #[error("Invalid month key: '{0}' (expected YYYY-MM or \"all\")")]
    InvalidMonthKey(String),

    #[error("Minute value out of range in {field}: {value} (expected 0..=1440)")]
    MinuteOutOfRange { field: String, value: u32 },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Bucket width must be at least one minute")]
    InvalidBucketWidth,
}

pub type Result<T> = std::result::Result<T, OverlapError>;
