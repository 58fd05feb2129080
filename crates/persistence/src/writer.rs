//! Insight writer

use std::path::Path;

use csv_async::{AsyncSerializer, AsyncWriterBuilder};
use tokio::io::AsyncWrite;

use call_insights_core::{InsightRecord, Result, OUTPUT_HEADER};

use crate::csv_error;

/// Writes annotated rows, header first
pub struct InsightWriter<W: AsyncWrite + Unpin> {
    serializer: AsyncSerializer<W>,
    rows: usize,
}

impl<W: AsyncWrite + Unpin> InsightWriter<W> {
    /// Wrap `inner` and write the header row
    ///
    /// The header is written explicitly so an empty batch still gets one.
    pub async fn new(inner: W) -> Result<Self> {
        let mut serializer = AsyncWriterBuilder::new()
            .has_headers(false)
            .create_serializer(inner);
        serializer.serialize(OUTPUT_HEADER).await.map_err(csv_error)?;
        Ok(Self { serializer, rows: 0 })
    }

    pub async fn write(&mut self, record: &InsightRecord) -> Result<()> {
        self.serializer.serialize(record).await.map_err(csv_error)?;
        self.rows += 1;
        Ok(())
    }

    /// Flush buffered rows, returning how many were written
    pub async fn finish(mut self) -> Result<usize> {
        self.serializer.flush().await?;
        Ok(self.rows)
    }
}

/// Write `records` to a new file at `path`
pub async fn write_insights(path: impl AsRef<Path>, records: &[InsightRecord]) -> Result<usize> {
    let path = path.as_ref();
    let file = tokio::fs::File::create(path).await?;

    let mut writer = InsightWriter::new(file).await?;
    for record in records {
        writer.write(record).await?;
    }
    let rows = writer.finish().await?;

    tracing::info!(path = %path.display(), rows, "Wrote insight file");
    Ok(rows)
}
