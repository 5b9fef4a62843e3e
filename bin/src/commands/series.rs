//! Series command implementation.

use anyhow::Result;
use std::path::PathBuf;
use tickbars_lib::prelude::*;

use super::{load_store, parse_interval};
use crate::InputArgs;
use crate::display::{self, Format};

/// Loads a tick file and writes its resampled OHLC series.
///
/// The table format has no series rendering and falls back to CSV.
pub(crate) async fn write_series(
    input: &InputArgs,
    interval: &str,
    format: Format,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let interval = parse_interval(interval)?;
    let store = load_store(input, quiet).await?;
    let series = resample(&store, interval);
    tracing::info!(%interval, buckets = series.len(), "resampled series");

    let writer = display::open_output(output.as_deref())?;
    display::write_series(
        &series,
        format.output_format().unwrap_or(OutputFormat::Csv),
        writer,
    )
}
