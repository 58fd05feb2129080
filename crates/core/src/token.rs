//! Analyzed tokens and the per-message token arena
//!
//! A message owns a `TokenChain`: a flat arena of tokens linked by index.
//! Links never leave the arena, so a chain can never span two messages and
//! dropping a message drops its tokens with it.

use serde::{Deserialize, Serialize};

/// One analysis of a word as reported by a morphology backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MorphAnalysis {
    /// Dictionary base form
    pub lemma: Option<String>,
    /// Grammatical tag, e.g. `S,имя,жен,од=им,ед`
    pub tag: Option<String>,
    /// Backend confidence for this analysis
    pub weight: Option<f64>,
}

/// A raw token returned by `MorphAnalyzer::analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAnalysis {
    /// Surface form as it appears in the text
    pub surface: String,
    /// Best analysis, `None` for punctuation, whitespace and unknown input
    pub analysis: Option<MorphAnalysis>,
}

impl TokenAnalysis {
    pub fn analyzed(surface: impl Into<String>, analysis: MorphAnalysis) -> Self {
        Self {
            surface: surface.into(),
            analysis: Some(analysis),
        }
    }

    pub fn unanalyzed(surface: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            analysis: None,
        }
    }
}

/// A token kept in a message's chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedToken {
    pub surface: String,
    /// Empty when the backend omitted it
    pub lemma: String,
    /// Empty when the backend omitted it
    pub tag: String,
    pub weight: Option<f64>,
    prev: Option<usize>,
    next: Option<usize>,
}

impl AnalyzedToken {
    /// Index of the previous kept token in the same message
    pub fn prev(&self) -> Option<usize> {
        self.prev
    }

    /// Index of the next kept token in the same message
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    /// Case-insensitive comparison of the surface form
    pub fn surface_is(&self, word: &str) -> bool {
        self.surface.to_lowercase() == word
    }

    pub fn lemma_is(&self, lemma: &str) -> bool {
        self.lemma == lemma
    }

    pub fn lemma_in(&self, lemmas: &[&str]) -> bool {
        lemmas.contains(&self.lemma.as_str())
    }

    pub fn tag_starts_with(&self, prefix: &str) -> bool {
        self.tag.starts_with(prefix)
    }
}

/// Ordered arena of the analyzed tokens of one message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenChain {
    tokens: Vec<AnalyzedToken>,
}

impl TokenChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an analyzer token
    ///
    /// Tokens without analysis are dropped and never become anyone's
    /// `prev`. Returns the index of the kept token.
    pub fn push(&mut self, token: TokenAnalysis) -> Option<usize> {
        let analysis = token.analysis?;
        let index = self.tokens.len();
        let prev = index.checked_sub(1);
        if let Some(prev) = prev {
            self.tokens[prev].next = Some(index);
        }
        self.tokens.push(AnalyzedToken {
            surface: token.surface,
            lemma: analysis.lemma.unwrap_or_default(),
            tag: analysis.tag.unwrap_or_default(),
            weight: analysis.weight,
            prev,
            next: None,
        });
        Some(index)
    }

    pub fn get(&self, index: usize) -> Option<&AnalyzedToken> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalyzedToken> {
        self.tokens.iter()
    }

    /// Token at `index` together with its two predecessors
    pub fn window(&self, index: usize) -> Option<TokenWindow<'_>> {
        let current = self.tokens.get(index)?;
        let previous = current.prev.and_then(|i| self.tokens.get(i));
        let before_previous = previous
            .and_then(|p| p.prev)
            .and_then(|i| self.tokens.get(i));
        Some(TokenWindow {
            current,
            previous,
            before_previous,
        })
    }

    /// Windows for every token, in scan order
    pub fn windows(&self) -> impl Iterator<Item = TokenWindow<'_>> {
        (0..self.tokens.len()).filter_map(move |i| self.window(i))
    }
}

impl FromIterator<TokenAnalysis> for TokenChain {
    fn from_iter<I: IntoIterator<Item = TokenAnalysis>>(iter: I) -> Self {
        let mut chain = TokenChain::new();
        for token in iter {
            chain.push(token);
        }
        chain
    }
}

/// The current token and up to two preceding tokens of the same message
#[derive(Debug, Clone, Copy)]
pub struct TokenWindow<'a> {
    pub current: &'a AnalyzedToken,
    pub previous: Option<&'a AnalyzedToken>,
    pub before_previous: Option<&'a AnalyzedToken>,
}
