//! Anchor selection and price points.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The instant a summarization pass is anchored at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Position in the resampled series (a selector slider value).
    Index(usize),
    /// An instant, resolved to the bucket at or before it.
    At(DateTime<Utc>),
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(i) => write!(f, "index {i}"),
            Self::At(at) => write!(f, "{}", at.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
        }
    }
}

/// A price observed at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Instant of the observation.
    pub at: DateTime<Utc>,
    /// Price at that instant.
    pub price: f64,
}

impl PricePoint {
    /// Creates a new price point.
    #[must_use]
    pub const fn new(at: DateTime<Utc>, price: f64) -> Self {
        Self { at, price }
    }
}
