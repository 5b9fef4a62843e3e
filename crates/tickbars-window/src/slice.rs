//! Lookback window extraction.

use chrono::{DateTime, Utc};
use tickbars_aggregate::{Bucket, ResampledSeries, TickStore};
use tickbars_types::{Tick, WindowSpec};

/// The raw ticks and resampled buckets inside one lookback window.
#[derive(Debug, Clone, Copy)]
pub struct WindowSlice<'a> {
    /// The window's configured duration.
    pub spec: WindowSpec,
    /// `anchor - duration`, inclusive.
    pub start: DateTime<Utc>,
    /// The anchor, inclusive.
    pub end: DateTime<Utc>,
    /// Ticks with `start <= timestamp <= end`.
    pub ticks: &'a [Tick],
    /// Buckets whose start lies in `[start, end]`.
    pub buckets: &'a [Bucket],
}

impl WindowSlice<'_> {
    /// Returns true if neither ticks nor buckets fall in the window.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ticks.is_empty() && self.buckets.is_empty()
    }
}

/// Extracts the `[anchor - duration, anchor]` window from the store and series.
///
/// Windows with no data yield empty slices rather than an error.
#[must_use]
pub fn slice_window<'a>(
    store: &'a TickStore,
    series: &'a ResampledSeries,
    anchor: DateTime<Utc>,
    spec: WindowSpec,
) -> WindowSlice<'a> {
    let start = anchor
        .checked_sub_signed(spec.as_delta())
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    WindowSlice {
        spec,
        start,
        end: anchor,
        ticks: store.slice(start, anchor),
        buckets: series.slice(start, anchor),
    }
}
