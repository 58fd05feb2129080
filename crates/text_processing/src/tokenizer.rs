//! Message tokenizer

use std::sync::Arc;

use call_insights_core::{MorphAnalyzer, Result, TokenChain};

/// Builds the token chain of one message
///
/// The analyzer is called once per message. Tokens without analysis
/// (whitespace, punctuation, unknown words) never enter the chain.
#[derive(Clone)]
pub struct MessageTokenizer {
    analyzer: Arc<dyn MorphAnalyzer>,
}

impl MessageTokenizer {
    pub fn new(analyzer: Arc<dyn MorphAnalyzer>) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &Arc<dyn MorphAnalyzer> {
        &self.analyzer
    }

    /// Analyze `text` and link the kept tokens
    ///
    /// # Errors
    /// Propagates analyzer failures unchanged; they abort the batch.
    pub async fn tokenize(&self, text: &str) -> Result<TokenChain> {
        let tokens = self.analyzer.analyze(text).await?;
        let total = tokens.len();
        let chain: TokenChain = tokens.into_iter().collect();

        tracing::trace!(
            analyzer = self.analyzer.name(),
            total,
            kept = chain.len(),
            "Tokenized message"
        );

        Ok(chain)
    }
}

impl std::fmt::Debug for MessageTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageTokenizer")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}
