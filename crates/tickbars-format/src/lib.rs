//! Output formatters for tickbars series and window summaries.
//!
//! This crate provides formatters for writing resampled series, window
//! results, and full summary bundles:
//!
//! - [`CsvFormatter`] - CSV / TSV format
//! - [`JsonFormatter`] - JSON array or NDJSON format

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::{JsonFormatter, JsonStyle};
