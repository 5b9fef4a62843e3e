//! CSV output format.

use std::io::Write;
use tickbars_aggregate::ResampledSeries;
use tickbars_window::{SummaryBundle, WindowReport};

use crate::{FormatError, Formatter};

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// CSV formatter.
#[derive(Debug, Clone, Default)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }

    fn window_header(&self) -> String {
        let d = self.delimiter;
        format!(
            "window_seconds{d}window_start{d}window_end{d}open{d}high{d}low{d}close{d}color\
             {d}tick_count{d}ticks_per_second{d}buy_count{d}sell_count{d}buy_percent\
             {d}sell_percent{d}start_marker_price"
        )
    }

    /// Formats one window row. Absent summaries leave their columns empty.
    fn window_row(&self, report: &WindowReport) -> String {
        let d = self.delimiter;
        let marker = report
            .start_marker
            .map(|m| m.price.to_string())
            .unwrap_or_default();

        match &report.summary {
            Some(s) => format!(
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                report.spec.duration_seconds(),
                s.window_start.format(TIME_FORMAT),
                s.window_end.format(TIME_FORMAT),
                s.open,
                s.high,
                s.low,
                s.close,
                s.color,
                s.tick_count,
                s.ticks_per_second,
                s.buy_count,
                s.sell_count,
                s.buy_percent,
                s.sell_percent,
                marker,
            ),
            None => {
                let empty = d.to_string().repeat(13);
                format!("{}{empty}{d}{marker}", report.spec.duration_seconds())
            }
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_series<W: Write + Send>(
        &self,
        series: &ResampledSeries,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "start{d}open{d}high{d}low{d}close{d}tick_count")?;
        }

        for bucket in series.buckets() {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                bucket.start.format("%Y-%m-%dT%H:%M:%SZ"),
                bucket.open,
                bucket.high,
                bucket.low,
                bucket.close,
                bucket.tick_count
            )?;
        }

        Ok(())
    }

    fn write_windows<W: Write + Send>(
        &self,
        windows: &[WindowReport],
        mut writer: W,
    ) -> Result<(), FormatError> {
        if self.include_header {
            writeln!(writer, "{}", self.window_header())?;
        }

        for report in windows {
            writeln!(writer, "{}", self.window_row(report))?;
        }

        Ok(())
    }

    fn write_bundle<W: Write + Send>(
        &self,
        bundle: &SummaryBundle,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "anchor_index{d}anchor_time{d}anchor_price{d}{}",
                self.window_header()
            )?;
        }

        for report in &bundle.windows {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}",
                bundle.anchor_index,
                bundle.anchor.at.format(TIME_FORMAT),
                bundle.anchor.price,
                self.window_row(report)
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == '\t' { "tsv" } else { "csv" }
    }
}
