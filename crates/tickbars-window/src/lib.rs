//! Lookback window slicing and multi-window summaries for tickbars.
//!
//! Given a [`TickStore`](tickbars_aggregate::TickStore) and its
//! [`ResampledSeries`](tickbars_aggregate::ResampledSeries), this crate
//! computes, for one anchor instant, a set of independently sized
//! `[anchor - duration, anchor]` windows:
//!
//! - [`slice_window`] - Raw ticks and buckets inside one window
//! - [`summarize`] - OHLC, color, tick rate, and buy/sell split for one window
//! - [`summarize_all`] / [`Engine`] - All configured windows for one anchor

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod slice;
mod summary;

pub use engine::{
    Engine, EngineConfig, SummaryBundle, WindowReport, resolve_anchor, summarize_all,
};
pub use slice::{WindowSlice, slice_window};
pub use summary::{Color, Dominance, WindowSummary, summarize};
