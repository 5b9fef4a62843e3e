//! Info command implementation.
//!
//! Prints tick store statistics and the shape of the resampled series.

use anyhow::Result;
use std::io::Write;
use tickbars_lib::prelude::*;

use super::{load_store, parse_interval};
use crate::InputArgs;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Show statistics for a tick file.
pub(crate) async fn show_info(input: &InputArgs, interval: &str, quiet: bool) -> Result<()> {
    let interval = parse_interval(interval)?;
    let store = load_store(input, quiet).await?;
    let series = resample(&store, interval);

    let mut out = std::io::stdout().lock();
    write_info(&store.stats(), &series, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Number of skipped intervals between consecutive buckets.
fn gap_count(series: &ResampledSeries) -> usize {
    let width = series.interval().as_delta();
    series
        .buckets()
        .windows(2)
        .filter(|pair| pair[1].start - pair[0].start > width)
        .count()
}

fn write_info(stats: &StoreStats, series: &ResampledSeries, mut out: impl Write) -> Result<()> {
    writeln!(out, "Ticks:          {}", stats.tick_count)?;
    writeln!(out, "  priced:       {}", stats.priced_count)?;
    writeln!(out, "  no price:     {}", stats.missing_price_count)?;
    writeln!(out, "  buys:         {}", stats.buy_count)?;
    writeln!(out, "  sells:        {}", stats.sell_count)?;
    writeln!(out, "  no side:      {}", stats.undefined_side_count)?;

    if let (Some(first), Some(last)) = (stats.first, stats.last) {
        writeln!(out, "First tick:     {}", first.format(TIME_FORMAT))?;
        writeln!(out, "Last tick:      {}", last.format(TIME_FORMAT))?;
    }

    writeln!(out)?;
    writeln!(out, "Interval:       {}", series.interval())?;
    writeln!(out, "Buckets:        {}", series.len())?;
    writeln!(out, "Gaps:           {}", gap_count(series))?;
    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        writeln!(out, "First bucket:   {}", first.start.format(TIME_FORMAT))?;
        writeln!(out, "Last bucket:    {}", last.start.format(TIME_FORMAT))?;
    }
    Ok(())
}
