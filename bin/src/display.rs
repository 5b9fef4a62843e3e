//! Display utilities and output formatting for the tickbars CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use tickbars_lib::prelude::*;
use tickbars_lib::{Dominance, JsonStyle};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Output format for reports.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Table,
    Csv,
    Tsv,
    Json,
    Ndjson,
}

impl Format {
    /// Returns the formatter-level format, or `None` for the text table.
    pub(crate) const fn output_format(self) -> Option<OutputFormat> {
        match self {
            Self::Table => None,
            Self::Csv => Some(OutputFormat::Csv),
            Self::Tsv => Some(OutputFormat::Tsv),
            Self::Json => Some(OutputFormat::Json),
            Self::Ndjson => Some(OutputFormat::Ndjson),
        }
    }
}

/// Opens a buffered writer to `path`, or to stdout when `path` is `None`.
pub(crate) fn open_output(path: Option<&Path>) -> Result<Box<dyn Write + Send>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(std::io::stdout())),
    })
}

/// Writes the resampled series in the given format.
pub(crate) fn write_series(
    series: &ResampledSeries,
    format: OutputFormat,
    mut writer: impl Write + Send,
) -> Result<()> {
    match format {
        OutputFormat::Csv => CsvFormatter::new().write_series(series, &mut writer)?,
        OutputFormat::Tsv => CsvFormatter::tsv().write_series(series, &mut writer)?,
        OutputFormat::Json => JsonFormatter::new().write_series(series, &mut writer)?,
        OutputFormat::Ndjson => JsonFormatter::ndjson().write_series(series, &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

/// Writes a summary bundle in the given format.
pub(crate) fn write_bundle(
    bundle: &SummaryBundle,
    format: OutputFormat,
    mut writer: impl Write + Send,
) -> Result<()> {
    match format {
        OutputFormat::Csv => CsvFormatter::new().write_bundle(bundle, &mut writer)?,
        OutputFormat::Tsv => CsvFormatter::tsv().write_bundle(bundle, &mut writer)?,
        OutputFormat::Json => JsonFormatter::new()
            .with_pretty(true)
            .write_bundle(bundle, &mut writer)?,
        OutputFormat::Ndjson => JsonFormatter::new()
            .with_style(JsonStyle::Ndjson)
            .write_bundle(bundle, &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

/// Writes a summary bundle as a human-readable table.
pub(crate) fn write_table(bundle: &SummaryBundle, mut writer: impl Write) -> Result<()> {
    writeln!(
        writer,
        "Anchor: {} (bucket {} of {})  price {}",
        bundle.anchor.at.format(TIME_FORMAT),
        bundle.anchor_index + 1,
        bundle.series.len(),
        bundle.anchor.price
    )?;
    writeln!(writer)?;
    writeln!(
        writer,
        "{:>8} {:>12} {:>12} {:>12} {:>12} {:>6} {:>8} {:>6} {:>5} {:>5}",
        "WINDOW", "OPEN", "HIGH", "LOW", "CLOSE", "COLOR", "TICKS", "TPS", "BUY%", "SELL%"
    )?;
    writeln!(writer, "{}", "-".repeat(96))?;

    for report in &bundle.windows {
        let window = report.spec.to_string();
        match &report.summary {
            Some(s) => writeln!(
                writer,
                "{:>8} {:>12} {:>12} {:>12} {:>12} {:>6} {:>8} {:>6} {:>5} {:>5}",
                window,
                s.open,
                s.high,
                s.low,
                s.close,
                s.color.as_str(),
                s.tick_count,
                s.ticks_per_second,
                share_label(s.buy_percent),
                share_label(s.sell_percent),
            )?,
            None => writeln!(writer, "{window:>8} {:>12}", "no data")?,
        }
    }

    let markers: Vec<_> = bundle
        .windows
        .iter()
        .filter_map(|r| r.start_marker.map(|m| (r.spec, m)))
        .collect();
    if !markers.is_empty() {
        writeln!(writer)?;
        for (spec, marker) in markers {
            writeln!(
                writer,
                "Start of {spec} window: {}  price {}",
                marker.at.format(TIME_FORMAT),
                marker.price
            )?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Formats a share with a marker for which side of 50 it falls on.
fn share_label(percent: u8) -> String {
    match Dominance::of(percent) {
        Dominance::Majority => format!("{percent}+"),
        Dominance::Minority => format!("{percent}-"),
        Dominance::Even => percent.to_string(),
    }
}

/// Creates a spinner for long-running loads, hidden in quiet mode.
pub(crate) fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Parses an anchor instant from epoch milliseconds or RFC 3339.
pub(crate) fn parse_instant(s: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    if let Ok(ms) = s.trim().parse::<i64>() {
        return chrono::DateTime::from_timestamp_millis(ms)
            .with_context(|| format!("Timestamp out of range: {s}"));
    }
    let dt = chrono::DateTime::parse_from_rfc3339(s.trim())
        .with_context(|| format!("Invalid anchor time: {s}"))?;
    Ok(dt.with_timezone(&chrono::Utc))
}
