//! Tick data representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::MalformedInputError;

/// A single trade tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Timestamp of the trade (UTC, millisecond precision).
    pub timestamp: DateTime<Utc>,
    /// Trade price, `None` when the source value was not a finite number.
    pub price: Option<f64>,
    /// Aggressor side: `Some(true)` buy, `Some(false)` sell, `None` undefined.
    pub side: Option<bool>,
    /// Original record fields, untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_fields: Vec<String>,
}

impl Tick {
    /// Creates a new tick with no passthrough fields.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, price: Option<f64>, side: Option<bool>) -> Self {
        Self {
            timestamp,
            price,
            side,
            raw_fields: Vec::new(),
        }
    }

    /// Creates a tick from epoch milliseconds.
    ///
    /// Returns `None` if the millisecond value is outside chrono's range.
    #[must_use]
    pub fn from_millis(millis: i64, price: Option<f64>, side: Option<bool>) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(|ts| Self::new(ts, price, side))
    }

    /// Returns true if the tick carries a usable price.
    #[must_use]
    pub const fn has_price(&self) -> bool {
        self.price.is_some()
    }

    /// Returns true if the aggressor was a buyer.
    #[must_use]
    pub fn is_buy(&self) -> bool {
        self.side == Some(true)
    }

    /// Returns true if the aggressor was a seller.
    #[must_use]
    pub fn is_sell(&self) -> bool {
        self.side == Some(false)
    }
}

/// A tick record as extracted from the source, before normalization.
///
/// Every logical field is kept as optional text; [`RawTick::normalize`]
/// applies the coercion rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTick {
    /// Epoch milliseconds as text.
    pub timestamp: Option<String>,
    /// Price as text.
    pub price: Option<String>,
    /// Aggressor side as text.
    pub side: Option<String>,
    /// All fields of the source record, in source order.
    pub fields: Vec<String>,
}

impl RawTick {
    /// Creates a raw tick from its three logical fields.
    #[must_use]
    pub fn new(timestamp: impl Into<String>, price: impl Into<String>, side: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            price: Some(price.into()),
            side: Some(side.into()),
            fields: Vec::new(),
        }
    }

    /// Normalizes the record into a [`Tick`].
    ///
    /// The timestamp is strict: a missing or unparseable value is an error.
    /// Price and side are lenient and become `None` when they do not parse.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedInputError`] if the timestamp is missing or invalid.
    pub fn normalize(self, record: usize) -> Result<Tick, MalformedInputError> {
        let text = self
            .timestamp
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(MalformedInputError::MissingTimestamp { record })?;

        let timestamp = parse_millis(text)
            .and_then(DateTime::from_timestamp_millis)
            .ok_or_else(|| MalformedInputError::InvalidTimestamp {
                record,
                value: text.to_string(),
            })?;

        Ok(Tick {
            timestamp,
            price: self.price.as_deref().and_then(parse_price),
            side: self.side.as_deref().and_then(parse_side),
            raw_fields: self.fields,
        })
    }
}

/// Parses epoch milliseconds, accepting a trailing all-zero fraction (`"1000.0"`).
fn parse_millis(s: &str) -> Option<i64> {
    if let Ok(ms) = s.parse::<i64>() {
        return Some(ms);
    }
    let (whole, frac) = s.split_once('.')?;
    if !frac.is_empty() && frac.bytes().all(|b| b == b'0') {
        whole.parse().ok()
    } else {
        None
    }
}

/// Parses a price, treating non-finite values as missing.
fn parse_price(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Parses a boolean-like aggressor side flag.
///
/// Accepts `true`/`false` in lower, title, or upper case, and `1`/`0`.
/// Anything else is an undefined side.
#[must_use]
pub fn parse_side(s: &str) -> Option<bool> {
    match s.trim() {
        "true" | "True" | "TRUE" | "1" => Some(true),
        "false" | "False" | "FALSE" | "0" => Some(false),
        _ => None,
    }
}
