//! Asynchronous CSV tick record reading.

use csv_async::{AsyncReaderBuilder, StringRecord};
use futures::StreamExt;
use std::path::Path;
use thiserror::Error;
use tickbars_types::{MalformedInputError, RawTick, TickbarsError};
use tokio::io::AsyncRead;

use crate::{ColumnIndex, RecordSchema};

/// Errors that can occur while reading tick records.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV stream was malformed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv_async::Error),

    /// The header lacks a required column.
    #[error(transparent)]
    MalformedInput(#[from] MalformedInputError),
}

impl From<IngestError> for TickbarsError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Io(e) => Self::Io(e),
            IngestError::Csv(e) => Self::Csv(e.to_string()),
            IngestError::MalformedInput(e) => Self::MalformedInput(e),
        }
    }
}

/// Reads all tick records from a headered CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid CSV, or its
/// header lacks the timestamp column.
pub async fn read_csv(
    path: impl AsRef<Path>,
    schema: &RecordSchema,
) -> Result<Vec<RawTick>, IngestError> {
    let path = path.as_ref();
    let file = tokio::fs::File::open(path).await?;
    let records = read_records(file, schema).await?;
    tracing::debug!(path = %path.display(), records = records.len(), "read tick records");
    Ok(records)
}

/// Reads all tick records from a headered CSV stream.
///
/// Rows may have differing field counts. A row too short to hold the
/// timestamp column yields a record without a timestamp, which the tick
/// store later rejects.
///
/// # Errors
///
/// Returns an error if the stream is not valid CSV or its header lacks the
/// timestamp column.
pub async fn read_records<R>(reader: R, schema: &RecordSchema) -> Result<Vec<RawTick>, IngestError>
where
    R: AsyncRead + Unpin + Send,
{
    let mut reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv_async::Trim::All)
        .create_reader(reader);

    let columns = schema.resolve(reader.headers().await?.iter())?;

    let mut raw = Vec::new();
    let mut records = std::pin::pin!(reader.records());
    while let Some(record) = records.next().await {
        raw.push(to_raw_tick(&record?, &columns));
    }

    Ok(raw)
}

/// Extracts the logical fields from one record.
fn to_raw_tick(record: &StringRecord, columns: &ColumnIndex) -> RawTick {
    let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).map(str::to_string);

    RawTick {
        timestamp: field(Some(columns.timestamp)),
        price: field(columns.price),
        side: columns
            .side
            .and_then(|i| record.get(i))
            .map(|s| columns.side_text(s)),
        fields: record.iter().map(str::to_string).collect(),
    }
}
