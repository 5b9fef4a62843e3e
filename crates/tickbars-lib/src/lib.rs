//! Multi-resolution tick summaries: a resampled OHLC series plus
//! independently sized lookback window bars.
//!
//! This is a facade crate that re-exports functionality from the tickbars
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```
//! use tickbars_lib::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let store = TickStore::build(vec![
//!     RawTick::new("0", "100", "true"),
//!     RawTick::new("500", "101", "false"),
//!     RawTick::new("61000", "102", "true"),
//! ])?;
//!
//! let engine = Engine::new(store, EngineConfig::default())?;
//! let last = engine.series().len() - 1;
//! let bundle = engine.snapshot(Anchor::Index(last))?;
//!
//! for report in &bundle.windows {
//!     if let Some(summary) = &report.summary {
//!         println!("{}: {} {}/{}", report.spec, summary.color, summary.buy_percent, summary.sell_percent);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tickbars_types::*;

// Re-export store and resampling
pub use tickbars_aggregate::{Bucket, ResampledSeries, Resampler, StoreStats, TickStore, resample};

// Re-export window summarization
pub use tickbars_window::{
    Color, Dominance, Engine, EngineConfig, SummaryBundle, WindowReport, WindowSlice,
    WindowSummary, resolve_anchor, slice_window, summarize, summarize_all,
};

// Re-export ingestion
#[cfg(feature = "ingest")]
pub use tickbars_ingest::{ColumnIndex, IngestError, RecordSchema, read_csv, read_records};

// Re-export formatters
#[cfg(feature = "format")]
pub use tickbars_format::{CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat};

/// Prelude module for convenient imports.
///
/// ```
/// use tickbars_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickbars_types::{
        Anchor, ConfigError, Interval, MalformedInputError, OutOfRangeError, PricePoint, RawTick,
        Result, Tick, TickbarsError, WindowSpec,
    };

    pub use tickbars_aggregate::{Bucket, ResampledSeries, StoreStats, TickStore, resample};

    pub use tickbars_window::{
        Color, Engine, EngineConfig, SummaryBundle, WindowReport, WindowSummary, summarize_all,
    };

    #[cfg(feature = "ingest")]
    pub use tickbars_ingest::{RecordSchema, read_csv};

    #[cfg(feature = "format")]
    pub use tickbars_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};
}
