//! CSV persistence for transcript batches
//!
//! Provides:
//! - Reading transcript rows (`dlg_id, line_n, role, text`)
//! - Writing annotated rows (`dlg_id, line_n, role, text, insight`)

pub mod reader;
pub mod writer;

pub use reader::{read_transcripts, TranscriptReader, REQUIRED_COLUMNS};
pub use writer::{write_insights, InsightWriter};

use call_insights_core::Error;

fn csv_error(err: csv_async::Error) -> Error {
    Error::Csv(err.to_string())
}
