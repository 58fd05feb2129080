//! Static lexicon analyzer
//!
//! Segments text on Unicode word boundaries and looks every segment up in a
//! case-insensitive word list. Segments missing from the list (whitespace,
//! punctuation, unknown words) are returned without analysis.
//!
//! Lexicon files are TOML:
//!
//! ```toml
//! [[entries]]
//! word = "зовут"
//! lemma = "звать"
//! tag = "V,несов,пе=непрош,мн,изъяв,3-л"
//! weight = 1.0
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use call_insights_core::{Error, MorphAnalysis, MorphAnalyzer, Result, TokenAnalysis};

/// One word form of the lexicon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    pub lemma: String,
    pub tag: String,
    #[serde(default)]
    pub weight: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    entries: Vec<LexiconEntry>,
}

/// Word-list morphology backend
#[derive(Debug, Clone, Default)]
pub struct LexiconAnalyzer {
    entries: HashMap<String, MorphAnalysis>,
}

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert with weight 1.0
    pub fn with_entry(mut self, word: &str, lemma: &str, tag: &str) -> Self {
        self.insert(LexiconEntry {
            word: word.to_string(),
            lemma: lemma.to_string(),
            tag: tag.to_string(),
            weight: Some(1.0),
        });
        self
    }

    /// Add or replace a word form
    pub fn insert(&mut self, entry: LexiconEntry) {
        self.entries.insert(
            entry.word.to_lowercase(),
            MorphAnalysis {
                lemma: Some(entry.lemma),
                tag: Some(entry.tag),
                weight: entry.weight,
            },
        );
    }

    /// Parse a TOML lexicon
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: LexiconFile = toml::from_str(text)
            .map_err(|e| Error::analyzer(format!("invalid lexicon: {}", e)))?;

        let mut analyzer = Self::new();
        for entry in file.entries {
            analyzer.insert(entry);
        }
        Ok(analyzer)
    }

    /// Load a TOML lexicon file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::analyzer(format!("failed to read lexicon {}: {}", path.display(), e))
        })?;
        let analyzer = Self::from_toml_str(&text)?;

        tracing::info!(
            path = %path.display(),
            entries = analyzer.len(),
            "Loaded lexicon"
        );

        Ok(analyzer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, segment: &str) -> Option<MorphAnalysis> {
        self.entries.get(&segment.to_lowercase()).cloned()
    }
}

#[async_trait]
impl MorphAnalyzer for LexiconAnalyzer {
    async fn analyze(&self, text: &str) -> Result<Vec<TokenAnalysis>> {
        Ok(text
            .split_word_bounds()
            .map(|segment| TokenAnalysis {
                surface: segment.to_string(),
                analysis: self.lookup(segment),
            })
            .collect())
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}
