//! CLI command implementations.

pub(crate) mod info;
pub(crate) mod series;
pub(crate) mod summarize;

use anyhow::{Context, Result, bail};
use std::path::Path;
use tickbars_lib::prelude::*;

use crate::{EngineArgs, InputArgs, display};

impl InputArgs {
    /// Column mapping described by the input flags.
    fn schema(&self) -> RecordSchema {
        RecordSchema::default()
            .with_timestamp(&self.timestamp_column)
            .with_price(&self.price_column)
            .with_side(&self.side_column)
            .with_inverted_side(self.buyer_maker)
    }
}

/// Reads and normalizes the tick file named by `input`.
pub(crate) async fn load_store(input: &InputArgs, quiet: bool) -> Result<TickStore> {
    let pb = display::spinner(&format!("Reading {}", input.file.display()), quiet);

    let records = read_csv(&input.file, &input.schema())
        .await
        .with_context(|| format!("Failed to read {}", input.file.display()));
    pb.finish_and_clear();

    let store = TickStore::build(records?)
        .with_context(|| format!("Malformed tick data in {}", input.file.display()))?;
    tracing::info!(
        path = %input.file.display(),
        ticks = store.len(),
        "loaded tick store"
    );
    Ok(store)
}

/// Parses an interval flag.
pub(crate) fn parse_interval(s: &str) -> Result<Interval> {
    s.parse::<Interval>()
        .with_context(|| format!("Invalid interval: {s}"))
}

/// Builds the engine configuration from an optional file plus flag overrides.
pub(crate) async fn engine_config(args: &EngineArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => read_config(path).await?,
        None => EngineConfig::default(),
    };

    if let Some(interval) = &args.interval {
        config.interval = parse_interval(interval)?;
    }

    if !args.windows.is_empty() {
        config.windows = args
            .windows
            .iter()
            .map(|w| w.parse::<WindowSpec>().with_context(|| format!("Invalid window: {w}")))
            .collect::<Result<_>>()?;
    }

    let ranges = [args.range1, args.range2, args.range3];
    for (position, seconds) in ranges.into_iter().enumerate() {
        let Some(seconds) = seconds else { continue };
        let Some(spec) = WindowSpec::from_secs(seconds) else {
            bail!("Window range {} must be positive", position + 1);
        };
        let count = config.windows.len();
        let Some(slot) = config.windows.get_mut(position) else {
            bail!(
                "--range{} has no window to replace ({count} configured)",
                position + 1
            );
        };
        *slot = spec;
    }

    config.validate()?;
    tracing::debug!(interval = %config.interval, windows = config.windows.len(), "engine configured");
    Ok(config)
}

async fn read_config(path: &Path) -> Result<EngineConfig> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    EngineConfig::from_json(&json).with_context(|| format!("Invalid config {}", path.display()))
}
