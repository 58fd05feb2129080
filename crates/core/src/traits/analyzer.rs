//! Morphological analyzer interface

use async_trait::async_trait;

use crate::{Result, TokenAnalysis};

/// Morphological analysis backend
///
/// Implementations:
/// - `MystemAnalyzer` - long-lived `mystem` subprocess
/// - `LexiconAnalyzer` - in-memory word list
///
/// One instance is created per process and shared by every dialog of the
/// batch. Callers must invoke `shutdown` once the batch is done.
///
/// # Example
///
/// ```ignore
/// let analyzer: Arc<dyn MorphAnalyzer> = Arc::new(MystemAnalyzer::spawn(config).await?);
/// let tokens = analyzer.analyze("Меня зовут Анна").await?;
/// // [Меня (я), " ", зовут (звать), " ", Анна (анна, S,имя,...)]
/// analyzer.shutdown().await?;
/// ```
#[async_trait]
pub trait MorphAnalyzer: Send + Sync + 'static {
    /// Analyze raw text
    ///
    /// Returns every token of the input in order, including tokens the
    /// backend could not analyze (their `analysis` is `None`).
    ///
    /// # Errors
    /// Any error is fatal for the batch.
    async fn analyze(&self, text: &str) -> Result<Vec<TokenAnalysis>>;

    /// Release backend resources
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    /// Backend name for logging
    fn name(&self) -> &str;
}
