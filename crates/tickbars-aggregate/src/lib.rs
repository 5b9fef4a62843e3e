//! Tick storage and interval resampling for tickbars.
//!
//! This crate turns a batch of irregular ticks into time-indexed structures:
//!
//! - [`TickStore`] - Ordered, immutable tick batch with range and as-of lookups
//! - [`Bucket`] / [`ResampledSeries`] - Fixed-interval OHLC buckets, not gap-filled
//! - [`resample`] / [`Resampler`] - Tick-to-bucket resampling

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bucket;
mod resample;
mod store;

pub use bucket::{Bucket, ResampledSeries};
pub use resample::{Resampler, resample};
pub use store::{StoreStats, TickStore};
