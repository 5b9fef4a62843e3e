//! Core types for the tickbars tick summarization engine.
//!
//! This crate provides the fundamental data structures used throughout tickbars:
//!
//! - [`Tick`] - A single trade with timestamp, optional price, and aggressor side
//! - [`RawTick`] - An unparsed source record before normalization
//! - [`Interval`] - Resample bucket width
//! - [`WindowSpec`] - Lookback window duration
//! - [`Anchor`] - The instant a summary pass is computed for

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod anchor;
mod error;
mod interval;
mod tick;

pub use anchor::{Anchor, PricePoint};
pub use error::{ConfigError, MalformedInputError, OutOfRangeError, Result, TickbarsError};
pub use interval::{Interval, WindowSpec};
pub use tick::{RawTick, Tick, parse_side};
