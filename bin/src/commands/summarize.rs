//! Summarize command implementation.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tickbars_lib::prelude::*;

use super::{engine_config, load_store};
use crate::display::{self, Format};
use crate::{EngineArgs, InputArgs};

/// Loads a tick file and writes the window summaries at one anchor.
///
/// The anchor is the bucket at `at`, the instant `time`, or the last
/// bucket when neither is given.
pub(crate) async fn summarize(
    input: &InputArgs,
    args: &EngineArgs,
    at: Option<usize>,
    time: Option<&str>,
    format: Format,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let config = engine_config(args).await?;
    let store = load_store(input, quiet).await?;
    let engine = Engine::new(store, config)?;

    let anchor = match (at, time) {
        (Some(index), _) => Anchor::Index(index),
        (None, Some(time)) => Anchor::At(display::parse_instant(time)?),
        (None, None) => {
            let last = engine
                .series()
                .len()
                .checked_sub(1)
                .context("No priced ticks to summarize")?;
            Anchor::Index(last)
        }
    };

    let bundle = engine
        .snapshot(anchor)
        .with_context(|| format!("Cannot summarize at {anchor}"))?;
    tracing::info!(
        anchor = %anchor,
        windows = bundle.windows.len(),
        "summarized windows"
    );

    let writer = display::open_output(output.as_deref())?;
    match format.output_format() {
        Some(format) => display::write_bundle(&bundle, format, writer),
        None => display::write_table(&bundle, writer),
    }
}
