//! CSV tick record ingestion for tickbars.
//!
//! This crate adapts headered CSV trade exports into [`RawTick`] records:
//!
//! - [`RecordSchema`] - Column names for timestamp, price, and side, resolved by name
//! - [`read_csv`] / [`read_records`] - Async CSV reading via `csv-async`
//!
//! [`RawTick`]: tickbars_types::RawTick

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod schema;

pub use crate::csv::{IngestError, read_csv, read_records};
pub use schema::{ColumnIndex, RecordSchema};
