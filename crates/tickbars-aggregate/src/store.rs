//! Time-ordered, immutable tick storage.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tickbars_types::{MalformedInputError, RawTick, Tick};

/// An ordered, immutable batch of ticks.
///
/// Ticks are held in non-decreasing timestamp order. Ticks sharing a
/// timestamp keep their arrival order. All lookups are binary searches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickStore {
    ticks: Vec<Tick>,
}

impl TickStore {
    /// Builds a store from raw source records.
    ///
    /// Construction is all-or-nothing: the first record with a missing or
    /// unparseable timestamp aborts the build. Prices and sides that do not
    /// parse are kept as missing.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedInputError`] for the first record without a valid
    /// timestamp.
    pub fn build<I>(records: I) -> Result<Self, MalformedInputError>
    where
        I: IntoIterator<Item = RawTick>,
    {
        let ticks = records
            .into_iter()
            .enumerate()
            .map(|(i, raw)| raw.normalize(i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let store = Self::from_ticks(ticks);
        tracing::debug!(
            ticks = store.len(),
            first = ?store.first().map(|t| t.timestamp),
            last = ?store.last().map(|t| t.timestamp),
            "built tick store"
        );
        Ok(store)
    }

    /// Creates a store from already-normalized ticks, sorting them by time.
    #[must_use]
    pub fn from_ticks(mut ticks: Vec<Tick>) -> Self {
        if !ticks.is_sorted_by_key(|t| t.timestamp) {
            // Stable, so equal timestamps keep arrival order.
            ticks.sort_by_key(|t| t.timestamp);
        }
        Self { ticks }
    }

    /// Returns all ticks in time order.
    #[must_use]
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Returns the number of ticks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Returns true if the store holds no ticks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Returns the earliest tick.
    #[must_use]
    pub fn first(&self) -> Option<&Tick> {
        self.ticks.first()
    }

    /// Returns the latest tick.
    #[must_use]
    pub fn last(&self) -> Option<&Tick> {
        self.ticks.last()
    }

    /// Returns the ticks with `start <= timestamp <= end`.
    ///
    /// An inverted range yields an empty slice.
    #[must_use]
    pub fn slice(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> &[Tick] {
        if start > end {
            return &[];
        }
        let lo = self.ticks.partition_point(|t| t.timestamp < start);
        let hi = self.ticks.partition_point(|t| t.timestamp <= end);
        &self.ticks[lo..hi]
    }

    /// Returns the last tick at or before `instant`.
    #[must_use]
    pub fn as_of(&self, instant: DateTime<Utc>) -> Option<&Tick> {
        let idx = self.ticks.partition_point(|t| t.timestamp <= instant);
        idx.checked_sub(1).map(|i| &self.ticks[i])
    }

    /// Computes summary counts over the whole store.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let mut stats = StoreStats {
            tick_count: self.ticks.len(),
            first: self.first().map(|t| t.timestamp),
            last: self.last().map(|t| t.timestamp),
            ..StoreStats::default()
        };

        for tick in &self.ticks {
            if tick.has_price() {
                stats.priced_count += 1;
            } else {
                stats.missing_price_count += 1;
            }
            match tick.side {
                Some(true) => stats.buy_count += 1,
                Some(false) => stats.sell_count += 1,
                None => stats.undefined_side_count += 1,
            }
        }

        stats
    }
}

/// Counts describing the contents of a [`TickStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Total number of ticks.
    pub tick_count: usize,
    /// Ticks with a valid price.
    pub priced_count: usize,
    /// Ticks whose price was missing or not a number.
    pub missing_price_count: usize,
    /// Buyer-initiated ticks.
    pub buy_count: usize,
    /// Seller-initiated ticks.
    pub sell_count: usize,
    /// Ticks without a recognizable side.
    pub undefined_side_count: usize,
    /// Timestamp of the earliest tick.
    pub first: Option<DateTime<Utc>>,
    /// Timestamp of the latest tick.
    pub last: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    fn make_store() -> TickStore {
        TickStore::build(vec![
            RawTick::new("61000", "102", "true"),
            RawTick::new("0", "100", "true"),
            RawTick::new("500", "101", "false"),
            RawTick::new("500", "bad", "maybe"),
        ])
        .unwrap()
    }

    #[test]
    fn test_build_sorts_stably() {
        let store = make_store();
        let times: Vec<_> = store.ticks().iter().map(|t| t.timestamp.timestamp_millis()).collect();
        assert_eq!(times, vec![0, 500, 500, 61_000]);

        // Equal timestamps keep arrival order.
        assert_eq!(store.ticks()[1].price, Some(101.0));
        assert_eq!(store.ticks()[2].price, None);
    }

    #[test]
    fn test_build_fails_atomically() {
        let err = TickStore::build(vec![
            RawTick::new("0", "100", "true"),
            RawTick::new("oops", "100", "true"),
            RawTick::new("1000", "100", "true"),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            MalformedInputError::InvalidTimestamp {
                record: 2,
                value: "oops".to_string()
            }
        );
    }

    #[test]
    fn test_slice_inclusive() {
        let store = make_store();

        assert_eq!(store.slice(ms(500), ms(61_000)).len(), 3);
        assert_eq!(store.slice(ms(1000), ms(61_000)).len(), 1);
        assert_eq!(store.slice(ms(0), ms(0)).len(), 1);
        assert!(store.slice(ms(1000), ms(60_999)).is_empty());
        assert!(store.slice(ms(-10_000), ms(-1)).is_empty());
        assert!(store.slice(ms(61_000), ms(0)).is_empty());
    }

    #[test]
    fn test_as_of() {
        let store = make_store();

        assert!(store.as_of(ms(-1)).is_none());
        assert_eq!(store.as_of(ms(0)).unwrap().price, Some(100.0));
        assert_eq!(store.as_of(ms(60_000)).unwrap().timestamp, ms(500));
        assert_eq!(store.as_of(ms(99_000)).unwrap().price, Some(102.0));
    }

    #[test]
    fn test_stats() {
        let stats = make_store().stats();

        assert_eq!(stats.tick_count, 4);
        assert_eq!(stats.priced_count, 3);
        assert_eq!(stats.missing_price_count, 1);
        assert_eq!(stats.buy_count, 2);
        assert_eq!(stats.sell_count, 1);
        assert_eq!(stats.undefined_side_count, 1);
        assert_eq!(stats.first, Some(ms(0)));
        assert_eq!(stats.last, Some(ms(61_000)));
    }

    #[test]
    fn test_empty_store() {
        let store = TickStore::build(Vec::new()).unwrap();
        assert!(store.is_empty());
        assert!(store.as_of(ms(0)).is_none());
        assert!(store.slice(ms(0), ms(1)).is_empty());
        assert_eq!(store.stats(), StoreStats::default());
    }
}
