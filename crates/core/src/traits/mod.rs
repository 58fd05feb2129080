//! Core traits for pluggable backends
//!
//! - `MorphAnalyzer` - morphological analysis of raw utterances

mod analyzer;

pub use analyzer::MorphAnalyzer;
