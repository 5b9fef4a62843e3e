//! Error types for tickbars.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias for tickbars operations.
pub type Result<T> = std::result::Result<T, TickbarsError>;

/// Errors that can occur while building, summarizing, or exporting tick data.
#[derive(Error, Debug)]
pub enum TickbarsError {
    /// The input batch could not be turned into a tick store.
    #[error(transparent)]
    MalformedInput(#[from] MalformedInputError),

    /// The caller asked for an anchor outside the resampled series.
    #[error(transparent)]
    OutOfRange(#[from] OutOfRangeError),

    /// Invalid engine configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// CSV reading failed.
    #[error("CSV error: {0}")]
    Csv(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fatal input errors raised while constructing a tick store.
///
/// Record numbers are 1-based and count data records only (the header row
/// is not a record).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedInputError {
    /// A required column is absent from the header.
    #[error("Missing required column '{name}'")]
    MissingColumn {
        /// The configured column name.
        name: String,
    },

    /// A record has no timestamp value.
    #[error("Record {record}: missing timestamp")]
    MissingTimestamp {
        /// The offending record number.
        record: usize,
    },

    /// A record's timestamp is not an epoch-millisecond value.
    #[error("Record {record}: invalid timestamp '{value}'")]
    InvalidTimestamp {
        /// The offending record number.
        record: usize,
        /// The raw timestamp text.
        value: String,
    },
}

/// Anchor requests that fall outside the resampled series.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutOfRangeError {
    /// The series has no buckets, so no anchor is valid.
    #[error("Resampled series is empty")]
    EmptySeries,

    /// Anchor index is past the end of the series.
    #[error("Anchor index {index} out of range (series has {len} buckets)")]
    Index {
        /// The requested index.
        index: usize,
        /// Number of buckets in the series.
        len: usize,
    },

    /// Anchor instant is outside `[first, last]` bucket starts.
    #[error("Anchor {at} outside series range {first} to {last}")]
    Instant {
        /// The requested instant.
        at: DateTime<Utc>,
        /// Start of the first bucket.
        first: DateTime<Utc>,
        /// Start of the last bucket.
        last: DateTime<Utc>,
    },
}

/// Invalid engine configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No lookback windows were configured.
    #[error("At least one lookback window is required")]
    NoWindows,

    /// A duration or interval string could not be parsed.
    #[error("Invalid duration '{0}'")]
    InvalidDuration(String),
}
