//! Resampled OHLC buckets and the series that holds them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tickbars_types::Interval;

/// One fixed-width interval's OHLC summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Bucket open time (start of the interval).
    pub start: DateTime<Utc>,
    /// Price of the first priced tick.
    pub open: f64,
    /// Highest price during the interval.
    pub high: f64,
    /// Lowest price during the interval.
    pub low: f64,
    /// Price of the last priced tick.
    pub close: f64,
    /// Number of priced ticks in the bucket.
    pub tick_count: u32,
}

impl Bucket {
    /// Creates a new bucket.
    #[must_use]
    pub const fn new(
        start: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        tick_count: u32,
    ) -> Self {
        Self {
            start,
            open,
            high,
            low,
            close,
            tick_count,
        }
    }
}

/// Ordered, immutable sequence of non-empty buckets.
///
/// Bucket starts are strictly increasing but not necessarily contiguous:
/// intervals without a priced tick have no bucket. Cloning is cheap and
/// yields an independent snapshot of the same data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResampledSeries {
    interval: Interval,
    buckets: Arc<[Bucket]>,
}

impl ResampledSeries {
    /// Wraps buckets produced at the given interval.
    ///
    /// Callers must supply buckets with strictly increasing starts.
    #[must_use]
    pub fn new(interval: Interval, buckets: Vec<Bucket>) -> Self {
        debug_assert!(buckets.windows(2).all(|w| w[0].start < w[1].start));
        Self {
            interval,
            buckets: buckets.into(),
        }
    }

    /// Returns the bucket width.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Returns all buckets in time order.
    #[must_use]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Returns the number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if the series holds no buckets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Returns the bucket at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Bucket> {
        self.buckets.get(index)
    }

    /// Returns the earliest bucket.
    #[must_use]
    pub fn first(&self) -> Option<&Bucket> {
        self.buckets.first()
    }

    /// Returns the latest bucket.
    #[must_use]
    pub fn last(&self) -> Option<&Bucket> {
        self.buckets.last()
    }

    /// Returns the buckets whose start lies in `[start, end]`.
    #[must_use]
    pub fn slice(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> &[Bucket] {
        if start > end {
            return &[];
        }
        let lo = self.buckets.partition_point(|b| b.start < start);
        let hi = self.buckets.partition_point(|b| b.start <= end);
        &self.buckets[lo..hi]
    }

    /// Returns the index of the last bucket starting at or before `instant`.
    #[must_use]
    pub fn as_of_index(&self, instant: DateTime<Utc>) -> Option<usize> {
        self.buckets
            .partition_point(|b| b.start <= instant)
            .checked_sub(1)
    }

    /// Returns the last bucket starting at or before `instant`.
    #[must_use]
    pub fn as_of(&self, instant: DateTime<Utc>) -> Option<&Bucket> {
        self.as_of_index(instant).map(|i| &self.buckets[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    fn make_series() -> ResampledSeries {
        ResampledSeries::new(
            Interval::MINUTE,
            vec![
                Bucket::new(ms(0), 100.0, 101.0, 100.0, 101.0, 2),
                Bucket::new(ms(60_000), 102.0, 102.0, 102.0, 102.0, 1),
                Bucket::new(ms(300_000), 99.0, 103.0, 98.0, 98.5, 4),
            ],
        )
    }

    #[test]
    fn test_as_of_irregular_spacing() {
        let series = make_series();

        assert!(series.as_of(ms(-1)).is_none());
        assert_eq!(series.as_of_index(ms(0)), Some(0));
        assert_eq!(series.as_of_index(ms(59_999)), Some(0));
        // Gap between 60s and 300s resolves to the 60s bucket.
        assert_eq!(series.as_of_index(ms(200_000)), Some(1));
        assert_eq!(series.as_of(ms(900_000)).unwrap().close, 98.5);
    }

    #[test]
    fn test_slice() {
        let series = make_series();

        assert_eq!(series.slice(ms(0), ms(60_000)).len(), 2);
        assert_eq!(series.slice(ms(1), ms(300_000)).len(), 2);
        assert!(series.slice(ms(61_000), ms(299_999)).is_empty());
        assert!(series.slice(ms(300_000), ms(0)).is_empty());
    }

    #[test]
    fn test_clone_shares_snapshot() {
        let series = make_series();
        let copy = series.clone();
        assert_eq!(series, copy);
        assert!(std::ptr::eq(series.buckets(), copy.buckets()));
    }
}
