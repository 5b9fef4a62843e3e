//! Per-window OHLC, arrival rate, and buy/sell split.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tickbars_types::WindowSpec;

use crate::WindowSlice;

/// Direction of a window's move from open to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Close above open.
    Up,
    /// Close below open.
    Down,
    /// Close equal to open.
    Flat,
}

impl Color {
    /// Classifies an open/close pair.
    #[must_use]
    pub fn from_open_close(open: f64, close: f64) -> Self {
        if close > open {
            Self::Up
        } else if close < open {
            Self::Down
        } else {
            Self::Flat
        }
    }

    /// Returns the color name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Flat => "flat",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a side's share sits relative to an even split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dominance {
    /// More than 50 percent.
    Majority,
    /// Less than 50 percent.
    Minority,
    /// Exactly 50 percent.
    Even,
}

impl Dominance {
    /// Classifies a rounded percentage.
    #[must_use]
    pub const fn of(percent: u8) -> Self {
        if percent > 50 {
            Self::Majority
        } else if percent < 50 {
            Self::Minority
        } else {
            Self::Even
        }
    }
}

/// Statistics for one lookback window.
///
/// `buy_percent` and `sell_percent` are rounded independently and may sum
/// to 99 or 101.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    /// The window's configured duration.
    pub spec: WindowSpec,
    /// Inclusive window start.
    pub window_start: DateTime<Utc>,
    /// Inclusive window end (the anchor).
    pub window_end: DateTime<Utc>,
    /// Open of the first bucket in the window.
    pub open: f64,
    /// Close of the last bucket in the window.
    pub close: f64,
    /// Highest bucket high in the window.
    pub high: f64,
    /// Lowest bucket low in the window.
    pub low: f64,
    /// Open-to-close direction.
    pub color: Color,
    /// Raw ticks in the window, priced or not.
    pub tick_count: u64,
    /// `tick_count / duration`, rounded half to even.
    pub ticks_per_second: u64,
    /// Buyer-initiated ticks.
    pub buy_count: u64,
    /// Seller-initiated ticks.
    pub sell_count: u64,
    /// Buy share of sided ticks, 0 to 100.
    pub buy_percent: u8,
    /// Sell share of sided ticks, 0 to 100.
    pub sell_percent: u8,
}

impl WindowSummary {
    /// Returns how the buy share compares to an even split.
    #[must_use]
    pub const fn buy_dominance(&self) -> Dominance {
        Dominance::of(self.buy_percent)
    }

    /// Returns how the sell share compares to an even split.
    #[must_use]
    pub const fn sell_dominance(&self) -> Dominance {
        Dominance::of(self.sell_percent)
    }

    /// Returns the number of ticks with a recognized side.
    #[must_use]
    pub const fn sided_count(&self) -> u64 {
        self.buy_count + self.sell_count
    }
}

/// Summarizes one window slice.
///
/// Returns `None` when the slice has no buckets, since no OHLC can be formed.
/// Ticks are still counted when they fall inside the window but no bucket
/// starts there.
#[must_use]
pub fn summarize(slice: &WindowSlice<'_>) -> Option<WindowSummary> {
    let first = slice.buckets.first()?;
    let last = slice.buckets.last()?;

    let high = slice
        .buckets
        .iter()
        .map(|b| b.high)
        .fold(f64::NEG_INFINITY, f64::max);
    let low = slice
        .buckets
        .iter()
        .map(|b| b.low)
        .fold(f64::INFINITY, f64::min);

    let tick_count = slice.ticks.len() as u64;
    let (buy_count, sell_count) = slice
        .ticks
        .iter()
        .fold((0_u64, 0_u64), |(buy, sell), tick| match tick.side {
            Some(true) => (buy + 1, sell),
            Some(false) => (buy, sell + 1),
            None => (buy, sell),
        });
    let total = buy_count + sell_count;

    Some(WindowSummary {
        spec: slice.spec,
        window_start: slice.start,
        window_end: slice.end,
        open: first.open,
        close: last.close,
        high,
        low,
        color: Color::from_open_close(first.open, last.close),
        tick_count,
        ticks_per_second: rate(tick_count, slice.spec.duration_seconds()),
        buy_count,
        sell_count,
        buy_percent: percent(buy_count, total),
        sell_percent: percent(sell_count, total),
    })
}

/// Ticks per second, rounded half to even.
fn rate(count: u64, seconds: u32) -> u64 {
    (count as f64 / f64::from(seconds)).round_ties_even() as u64
}

/// Share of `total` as a whole percentage, rounded half to even. Zero when `total` is zero.
fn percent(count: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round_ties_even() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice_window;
    use approx::assert_relative_eq;
    use tickbars_aggregate::{Bucket, ResampledSeries, TickStore, resample};
    use tickbars_types::{Interval, RawTick, Tick};

    fn ms(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    fn secs(seconds: u32) -> WindowSpec {
        WindowSpec::from_secs(seconds).unwrap()
    }

    fn make_store() -> TickStore {
        TickStore::build(vec![
            RawTick::new("0", "100", "true"),
            RawTick::new("500", "101", "false"),
            RawTick::new("61000", "102", "true"),
        ])
        .unwrap()
    }

    #[test]
    fn test_single_bucket_window() {
        let store = make_store();
        let series = resample(&store, Interval::MINUTE);
        let slice = slice_window(&store, &series, ms(61_000), secs(60));

        let summary = summarize(&slice).unwrap();
        assert_eq!(summary.window_start, ms(1_000));
        assert_eq!(summary.window_end, ms(61_000));
        assert_eq!(summary.tick_count, 1);
        assert_eq!(summary.buy_count, 1);
        assert_eq!(summary.sell_count, 0);
        assert_eq!(summary.buy_percent, 100);
        assert_eq!(summary.sell_percent, 0);
        assert_eq!(summary.color, Color::Flat);
        assert_eq!(summary.ticks_per_second, 0);
    }

    #[test]
    fn test_two_sided_window() {
        let store = make_store();
        let series = resample(&store, Interval::MINUTE);
        // Only the second and third ticks, both inside [0ms, 61000ms].
        let store_shifted = TickStore::from_ticks(store.ticks()[1..].to_vec());
        let slice = slice_window(&store_shifted, &series, ms(61_000), secs(61));

        let summary = summarize(&slice).unwrap();
        assert_eq!(summary.tick_count, 2);
        assert_eq!(summary.buy_count, 1);
        assert_eq!(summary.sell_count, 1);
        assert_eq!(summary.buy_percent, 50);
        assert_eq!(summary.sell_percent, 50);
        assert_eq!(summary.buy_dominance(), Dominance::Even);
    }

    #[test]
    fn test_full_window_ohlc() {
        let store = make_store();
        let series = resample(&store, Interval::MINUTE);
        let slice = slice_window(&store, &series, ms(61_000), secs(61));

        let summary = summarize(&slice).unwrap();
        assert_relative_eq!(summary.open, 100.0);
        assert_relative_eq!(summary.close, 102.0);
        assert_relative_eq!(summary.high, 102.0);
        assert_relative_eq!(summary.low, 100.0);
        assert_eq!(summary.color, Color::Up);
        assert_eq!(summary.tick_count, 3);
        assert_eq!(summary.buy_percent, 67);
        assert_eq!(summary.sell_percent, 33);
        assert_eq!(summary.buy_dominance(), Dominance::Majority);
        assert_eq!(summary.sell_dominance(), Dominance::Minority);
    }

    #[test]
    fn test_empty_buckets_is_none() {
        let store = make_store();
        let series = resample(&store, Interval::MINUTE);

        let slice = slice_window(&store, &series, ms(-5_000), secs(60));
        assert!(summarize(&slice).is_none());

        // Ticks present but no bucket starts inside the window.
        let slice = slice_window(&store, &series, ms(1_500), secs(1));
        assert_eq!(slice.ticks.len(), 1);
        assert!(summarize(&slice).is_none());
    }

    #[test]
    fn test_down_color() {
        let series = ResampledSeries::new(
            Interval::MINUTE,
            vec![
                Bucket::new(ms(0), 10.0, 11.0, 9.0, 10.5, 3),
                Bucket::new(ms(120_000), 10.5, 10.6, 8.0, 8.5, 2),
            ],
        );
        let store = TickStore::default();
        let slice = slice_window(&store, &series, ms(120_000), secs(120));

        let summary = summarize(&slice).unwrap();
        assert_eq!(summary.color, Color::Down);
        assert_relative_eq!(summary.high, 11.0);
        assert_relative_eq!(summary.low, 8.0);
        assert_eq!(summary.tick_count, 0);
        assert_eq!(summary.ticks_per_second, 0);
        assert_eq!(summary.buy_percent, 0);
        assert_eq!(summary.sell_percent, 0);
    }

    #[test]
    fn test_undefined_side_excluded() {
        let ticks = vec![
            Tick::from_millis(1_000, Some(1.0), Some(true)).unwrap(),
            Tick::from_millis(2_000, Some(1.0), None).unwrap(),
            Tick::from_millis(3_000, None, None).unwrap(),
            Tick::from_millis(4_000, Some(1.0), Some(false)).unwrap(),
            Tick::from_millis(5_000, Some(1.0), Some(true)).unwrap(),
        ];
        let store = TickStore::from_ticks(ticks);
        let series = resample(&store, Interval::MINUTE);
        let slice = slice_window(&store, &series, ms(5_000), secs(5));

        let summary = summarize(&slice).unwrap();
        assert_eq!(summary.tick_count, 5);
        assert_eq!(summary.sided_count(), 3);
        assert!(summary.sided_count() <= summary.tick_count);
        assert_eq!(summary.ticks_per_second, 1);
        assert_eq!(summary.buy_percent, 67);
        assert_eq!(summary.sell_percent, 33);
    }

    #[test]
    fn test_all_sides_undefined() {
        let ticks = (0..4)
            .map(|i| Tick::from_millis(i * 1_000, Some(5.0), None).unwrap())
            .collect();
        let store = TickStore::from_ticks(ticks);
        let series = resample(&store, Interval::MINUTE);
        let slice = slice_window(&store, &series, ms(3_000), secs(10));

        let summary = summarize(&slice).unwrap();
        assert_eq!(summary.tick_count, 4);
        assert_eq!(summary.sided_count(), 0);
        assert_eq!(summary.buy_percent, 0);
        assert_eq!(summary.sell_percent, 0);
    }

    #[test]
    fn test_rate_ties_to_even() {
        assert_eq!(rate(0, 60), 0);
        assert_eq!(rate(30, 60), 0);
        assert_eq!(rate(90, 60), 2);
        assert_eq!(rate(150, 60), 2);
        assert_eq!(rate(91, 60), 2);
        assert_eq!(rate(7_200, 720), 10);
    }

    #[test]
    fn test_percent_independent_rounding() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 8), 12);
        assert_eq!(percent(3, 8), 38);
        assert_eq!(percent(5, 8), 62);
        // Exact ties round to even.
        assert_eq!(percent(1, 200), 0);
        assert_eq!(percent(199, 200), 100);
        assert_eq!(percent(1, 3) + percent(2, 3), 100);
        assert_eq!(percent(15, 1000), 2);
        assert_eq!(percent(985, 1000), 98);
    }

    #[test]
    fn test_percentages_may_not_sum_to_hundred() {
        // 17/40 lands just below 42.5 and 23/40 just below 57.5.
        assert_eq!(percent(17, 40), 42);
        assert_eq!(percent(23, 40), 57);
        // 91/200 and 109/200 land just above their ties.
        assert_eq!(percent(91, 200), 46);
        assert_eq!(percent(109, 200), 55);
    }
}
