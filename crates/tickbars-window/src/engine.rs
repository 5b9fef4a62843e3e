//! Multi-window orchestration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tickbars_aggregate::{Bucket, ResampledSeries, TickStore, resample};
use tickbars_types::{
    Anchor, ConfigError, Interval, OutOfRangeError, PricePoint, TickbarsError, WindowSpec,
};

use crate::{WindowSummary, slice_window, summarize};

/// Engine configuration: resample interval plus the ordered lookback windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Resample bucket width.
    pub interval: Interval,
    /// Lookback windows, summarized in this order.
    pub windows: Vec<WindowSpec>,
}

impl EngineConfig {
    /// Default lookback windows in seconds.
    pub const DEFAULT_WINDOWS: [u32; 3] = [720, 1500, 4000];

    /// Creates a configuration.
    #[must_use]
    pub const fn new(interval: Interval, windows: Vec<WindowSpec>) -> Self {
        Self { interval, windows }
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the result is invalid.
    pub fn from_json(json: &str) -> Result<Self, TickbarsError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that at least one window is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoWindows`] for an empty window list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.windows.is_empty() {
            return Err(ConfigError::NoWindows);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            interval: Interval::MINUTE,
            windows: Self::DEFAULT_WINDOWS
                .iter()
                .filter_map(|&s| WindowSpec::from_secs(s))
                .collect(),
        }
    }
}

/// Summarizes every window in `specs` at `anchor`, preserving order.
///
/// Each window is computed from its own slice only. Empty windows yield `None`.
#[must_use]
pub fn summarize_all(
    store: &TickStore,
    series: &ResampledSeries,
    anchor: DateTime<Utc>,
    specs: &[WindowSpec],
) -> Vec<Option<WindowSummary>> {
    specs
        .iter()
        .map(|&spec| summarize(&slice_window(store, series, anchor, spec)))
        .collect()
}

/// Resolves an anchor to a series index and its price point.
///
/// Index anchors land on a bucket start. Instant anchors keep their instant
/// and take the price of the bucket at or before it.
///
/// # Errors
///
/// Returns [`OutOfRangeError`] if the series is empty, the index is past the
/// end, or the instant lies outside `[first.start, last.start]`.
pub fn resolve_anchor(
    series: &ResampledSeries,
    anchor: Anchor,
) -> Result<(usize, PricePoint), OutOfRangeError> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(OutOfRangeError::EmptySeries),
    };

    match anchor {
        Anchor::Index(index) => series
            .get(index)
            .map(|b| (index, PricePoint::new(b.start, b.close)))
            .ok_or(OutOfRangeError::Index {
                index,
                len: series.len(),
            }),
        Anchor::At(at) => {
            let out_of_range = OutOfRangeError::Instant {
                at,
                first: first.start,
                last: last.start,
            };
            if at < first.start || at > last.start {
                return Err(out_of_range);
            }
            series
                .as_of_index(at)
                .map(|i| (i, PricePoint::new(at, series.buckets()[i].close)))
                .ok_or(out_of_range)
        }
    }
}

/// One window's result in a [`SummaryBundle`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowReport {
    /// The window's configured duration.
    pub spec: WindowSpec,
    /// Window statistics, absent when no bucket falls in the window.
    pub summary: Option<WindowSummary>,
    /// Series price at the window start, present when the window holds ticks.
    pub start_marker: Option<PricePoint>,
}

/// Everything a renderer needs for one anchor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryBundle {
    /// Series index of the anchor bucket.
    pub anchor_index: usize,
    /// The anchor instant and its price.
    pub anchor: PricePoint,
    /// The full resampled series.
    pub series: ResampledSeries,
    /// Per-window results, in configuration order.
    pub windows: Vec<WindowReport>,
}

impl SummaryBundle {
    /// Returns the window summaries in configuration order.
    pub fn summaries(&self) -> impl Iterator<Item = Option<&WindowSummary>> + '_ {
        self.windows.iter().map(|w| w.summary.as_ref())
    }
}

/// A tick batch prepared for repeated summarization.
///
/// The series is resampled once at construction. Every [`Engine::snapshot`]
/// call is a pure read, so snapshots for different anchors may run in
/// parallel.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    store: TickStore,
    series: ResampledSeries,
}

impl Engine {
    /// Creates an engine, resampling the store at the configured interval.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn new(store: TickStore, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let series = resample(&store, config.interval);
        Ok(Self {
            config,
            store,
            series,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the tick store.
    #[must_use]
    pub const fn store(&self) -> &TickStore {
        &self.store
    }

    /// Returns the resampled series.
    #[must_use]
    pub const fn series(&self) -> &ResampledSeries {
        &self.series
    }

    /// Returns the last bucket starting at or before `instant`.
    #[must_use]
    pub fn as_of(&self, instant: DateTime<Utc>) -> Option<&Bucket> {
        self.series.as_of(instant)
    }

    /// Summarizes all configured windows at `anchor`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if the anchor is outside the series.
    pub fn summarize_all(
        &self,
        anchor: Anchor,
    ) -> Result<Vec<Option<WindowSummary>>, OutOfRangeError> {
        let (_, point) = resolve_anchor(&self.series, anchor)?;
        Ok(summarize_all(
            &self.store,
            &self.series,
            point.at,
            &self.config.windows,
        ))
    }

    /// Builds the full summary bundle for `anchor`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if the anchor is outside the series.
    pub fn snapshot(&self, anchor: Anchor) -> Result<SummaryBundle, OutOfRangeError> {
        let (anchor_index, point) = resolve_anchor(&self.series, anchor)?;

        let windows = self
            .config
            .windows
            .iter()
            .map(|&spec| {
                let slice = slice_window(&self.store, &self.series, point.at, spec);
                let start_marker = if slice.ticks.is_empty() {
                    None
                } else {
                    self.series
                        .as_of(slice.start)
                        .map(|b| PricePoint::new(slice.start, b.close))
                };
                WindowReport {
                    spec,
                    summary: summarize(&slice),
                    start_marker,
                }
            })
            .collect();

        tracing::debug!(%anchor, anchor_index, at = %point.at, "computed summary bundle");
        Ok(SummaryBundle {
            anchor_index,
            anchor: point,
            series: self.series.clone(),
            windows,
        })
    }
}
