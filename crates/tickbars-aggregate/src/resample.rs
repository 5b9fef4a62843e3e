//! Streaming tick-to-bucket resampling.

use chrono::{DateTime, Utc};
use tickbars_types::{Interval, Tick};

use crate::{Bucket, ResampledSeries, TickStore};

/// Resamples every priced tick in `store` into fixed-width buckets.
///
/// Intervals without a priced tick produce no bucket. The result depends
/// only on the store contents and `interval`.
#[must_use]
pub fn resample(store: &TickStore, interval: Interval) -> ResampledSeries {
    let mut resampler = Resampler::new(interval);
    let mut buckets = Vec::new();

    for tick in store.ticks() {
        if let Some(bucket) = resampler.process(tick) {
            buckets.push(bucket);
        }
    }

    if let Some(bucket) = resampler.finish() {
        buckets.push(bucket);
    }

    tracing::debug!(
        ticks = store.len(),
        buckets = buckets.len(),
        %interval,
        "resampled tick store"
    );
    ResampledSeries::new(interval, buckets)
}

/// Streaming tick resampler.
///
/// Ticks must be fed in non-decreasing timestamp order. Ticks without a
/// price are ignored.
#[derive(Debug)]
pub struct Resampler {
    interval: Interval,
    current: Option<BucketBuilder>,
}

impl Resampler {
    /// Creates a new resampler for the given interval.
    #[must_use]
    pub const fn new(interval: Interval) -> Self {
        Self {
            interval,
            current: None,
        }
    }

    /// Returns the bucket width.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Processes a tick, potentially emitting a completed bucket.
    ///
    /// Returns `Some(bucket)` when this tick opens a new interval,
    /// `None` otherwise.
    pub fn process(&mut self, tick: &Tick) -> Option<Bucket> {
        let price = tick.price?;
        let start = bucket_start(tick.timestamp, self.interval);

        match self.current.take() {
            Some(mut builder) if builder.start == start => {
                builder.update(price);
                self.current = Some(builder);
                None
            }
            Some(builder) => {
                self.current = Some(BucketBuilder::new(start, price));
                Some(builder.finish())
            }
            None => {
                self.current = Some(BucketBuilder::new(start, price));
                None
            }
        }
    }

    /// Finishes resampling, returning any remaining partial bucket.
    #[must_use]
    pub fn finish(self) -> Option<Bucket> {
        self.current.map(BucketBuilder::finish)
    }
}

/// Builder for a single bucket.
#[derive(Debug)]
struct BucketBuilder {
    start: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    tick_count: u32,
}

impl BucketBuilder {
    /// Creates a new builder from the first price.
    const fn new(start: DateTime<Utc>, price: f64) -> Self {
        Self {
            start,
            open: price,
            high: price,
            low: price,
            close: price,
            tick_count: 1,
        }
    }

    /// Updates the builder with the next price.
    fn update(&mut self, price: f64) {
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.close = price;
        self.tick_count = self.tick_count.saturating_add(1);
    }

    /// Finishes building and returns the bucket.
    const fn finish(self) -> Bucket {
        Bucket::new(
            self.start,
            self.open,
            self.high,
            self.low,
            self.close,
            self.tick_count,
        )
    }
}

/// Floors a timestamp to the start of its epoch-aligned interval.
fn bucket_start(timestamp: DateTime<Utc>, interval: Interval) -> DateTime<Utc> {
    let width = interval.milliseconds();
    let floored = timestamp.timestamp_millis().div_euclid(width) * width;
    // Only fails within one interval of chrono's minimum date.
    DateTime::from_timestamp_millis(floored).unwrap_or(timestamp)
}
