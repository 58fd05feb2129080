//! Error types shared by the insight engine crates

use thiserror::Error;

/// Result alias used across the workspace
pub type Result<T> = std::result::Result<T, Error>;

/// Insight engine errors
///
/// Every variant is fatal for the batch: there are no retries and no
/// per-dialog fault isolation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Morphological analyzer error: {0}")]
    Analyzer(String),

    #[error("Unsupported input file: {0}")]
    UnsupportedInput(String),

    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an analyzer error
    pub fn analyzer(message: impl Into<String>) -> Self {
        Self::Analyzer(message.into())
    }
}
