//! JSON output format.

use serde::Serialize;
use std::io::Write;
use tickbars_aggregate::ResampledSeries;
use tickbars_window::{SummaryBundle, WindowReport};

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    fn write_value<W: Write, T: Serialize + ?Sized>(
        &self,
        value: &T,
        mut writer: W,
    ) -> Result<(), FormatError> {
        if self.pretty && self.style == JsonStyle::Array {
            serde_json::to_writer_pretty(&mut writer, value)?;
        } else {
            serde_json::to_writer(&mut writer, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_rows<W: Write, T: Serialize>(
        &self,
        rows: &[T],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => self.write_value(rows, writer),
            JsonStyle::Ndjson => {
                for row in rows {
                    serde_json::to_writer(&mut writer, row)?;
                    writeln!(writer)?;
                }
                Ok(())
            }
        }
    }
}

impl Formatter for JsonFormatter {
    fn write_series<W: Write + Send>(
        &self,
        series: &ResampledSeries,
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_rows(series.buckets(), writer)
    }

    fn write_windows<W: Write + Send>(
        &self,
        windows: &[WindowReport],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_rows(windows, writer)
    }

    fn write_bundle<W: Write + Send>(
        &self,
        bundle: &SummaryBundle,
        writer: W,
    ) -> Result<(), FormatError> {
        // A bundle is a single object in both styles.
        self.write_value(bundle, writer)
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
