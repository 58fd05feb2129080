//! Morphological tokenization for the call insight engine
//!
//! This crate turns raw utterances into token chains:
//! - **MessageTokenizer**: analyzer output → per-message `TokenChain`
//! - **MystemAnalyzer**: Yandex mystem subprocess backend
//! - **LexiconAnalyzer**: static word list backend (tests, offline runs)
//!
//! # Example
//!
//! ```ignore
//! use call_insights_text_processing::{MessageTokenizer, MystemAnalyzer, MystemConfig};
//!
//! let analyzer = Arc::new(MystemAnalyzer::spawn(MystemConfig::default()).await?);
//! let tokenizer = MessageTokenizer::new(analyzer.clone());
//! let chain = tokenizer.tokenize("Меня зовут Анна").await?;
//! assert_eq!(chain.len(), 3);
//! analyzer.shutdown().await?;
//! ```

pub mod lexicon;
pub mod mystem;
mod tokenizer;

pub use lexicon::{LexiconAnalyzer, LexiconEntry};
pub use mystem::{parse_mystem_output, MystemAnalyzer, MystemConfig};
pub use tokenizer::MessageTokenizer;
