//! Column mapping from source records to logical tick fields.

use tickbars_types::{MalformedInputError, parse_side};

/// Names of the columns holding each logical tick field.
///
/// Defaults match exchange aggregate-trade exports: `T` (epoch ms),
/// `p` (price), `m` (side flag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    /// Timestamp column (required).
    pub timestamp: String,
    /// Price column (optional in the source).
    pub price: String,
    /// Side column (optional in the source).
    pub side: String,
    /// Treat the side flag as "buyer is maker", i.e. `true` means a sell.
    pub invert_side: bool,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            timestamp: "T".to_string(),
            price: "p".to_string(),
            side: "m".to_string(),
            invert_side: false,
        }
    }
}

impl RecordSchema {
    /// Sets the timestamp column name.
    #[must_use]
    pub fn with_timestamp(mut self, name: impl Into<String>) -> Self {
        self.timestamp = name.into();
        self
    }

    /// Sets the price column name.
    #[must_use]
    pub fn with_price(mut self, name: impl Into<String>) -> Self {
        self.price = name.into();
        self
    }

    /// Sets the side column name.
    #[must_use]
    pub fn with_side(mut self, name: impl Into<String>) -> Self {
        self.side = name.into();
        self
    }

    /// Sets whether the side flag is inverted.
    #[must_use]
    pub const fn with_inverted_side(mut self, invert: bool) -> Self {
        self.invert_side = invert;
        self
    }

    /// Resolves column names against a header row, once per file.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedInputError::MissingColumn`] if the timestamp column
    /// is absent. Absent price or side columns are allowed.
    pub fn resolve<'h, I>(&self, headers: I) -> Result<ColumnIndex, MalformedInputError>
    where
        I: IntoIterator<Item = &'h str>,
    {
        let headers: Vec<&str> = headers.into_iter().map(str::trim).collect();
        let find = |name: &str| headers.iter().position(|h| *h == name);

        let timestamp = find(&self.timestamp).ok_or_else(|| MalformedInputError::MissingColumn {
            name: self.timestamp.clone(),
        })?;

        Ok(ColumnIndex {
            timestamp,
            price: find(&self.price),
            side: find(&self.side),
            invert_side: self.invert_side,
        })
    }
}

/// Column positions resolved from a [`RecordSchema`] and a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    /// Timestamp column position.
    pub timestamp: usize,
    /// Price column position, if present.
    pub price: Option<usize>,
    /// Side column position, if present.
    pub side: Option<usize>,
    /// Whether side flags are inverted.
    pub invert_side: bool,
}

impl ColumnIndex {
    /// Maps a raw side value through the inversion setting.
    pub(crate) fn side_text(&self, value: &str) -> String {
        if !self.invert_side {
            return value.to_string();
        }
        parse_side(value).map_or_else(|| value.to_string(), |side| (!side).to_string())
    }
}
