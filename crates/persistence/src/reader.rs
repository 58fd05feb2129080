//! Transcript reader

use std::path::Path;

use csv_async::AsyncReaderBuilder;
use futures::StreamExt;

use call_insights_core::{Error, Result, TranscriptRecord};

use crate::csv_error;

/// Columns every transcript file must provide
pub const REQUIRED_COLUMNS: [&str; 4] = ["dlg_id", "line_n", "role", "text"];

const CSV_EXTENSION: &str = "csv";
const UTF8_BOM: char = '\u{feff}';

/// Reads transcript rows from a delimited file
#[derive(Debug, Clone)]
pub struct TranscriptReader {
    delimiter: u8,
}

impl Default for TranscriptReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl TranscriptReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read every row of `path`
    ///
    /// # Errors
    /// - `Error::UnsupportedInput` for a non-`.csv` path or missing columns
    /// - `Error::InvalidRecord` for a row that does not deserialize
    pub async fn read(&self, path: impl AsRef<Path>) -> Result<Vec<TranscriptRecord>> {
        let path = path.as_ref();
        if path.extension().and_then(|ext| ext.to_str()) != Some(CSV_EXTENSION) {
            return Err(Error::UnsupportedInput(format!(
                "csv reader can not read this file: {}",
                path.display()
            )));
        }

        let content = tokio::fs::read_to_string(path).await?;
        let records = self.parse(&content).await?;

        tracing::info!(
            path = %path.display(),
            records = records.len(),
            "Read transcript file"
        );

        Ok(records)
    }

    /// Parse transcript rows from in-memory CSV text
    pub async fn parse(&self, content: &str) -> Result<Vec<TranscriptRecord>> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

        let mut deserializer = AsyncReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .create_deserializer(content.as_bytes());

        let headers = deserializer.headers().await.map_err(csv_error)?;
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|header| header == *column))
            .collect();
        if !missing.is_empty() {
            return Err(Error::UnsupportedInput(format!(
                "missing columns: {}",
                missing.join(", ")
            )));
        }

        let mut records = Vec::new();
        let rows = deserializer.deserialize::<TranscriptRecord>();
        futures::pin_mut!(rows);
        while let Some(row) = rows.next().await {
            let record = row.map_err(|e| Error::InvalidRecord {
                row: records.len() + 1,
                message: e.to_string(),
            })?;
            records.push(record);
        }

        Ok(records)
    }
}

/// Read a comma-separated transcript file
pub async fn read_transcripts(path: impl AsRef<Path>) -> Result<Vec<TranscriptRecord>> {
    TranscriptReader::new().read(path).await
}
