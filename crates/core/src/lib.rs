//! Core traits and types for the call insight engine
//!
//! This crate provides foundational types used across all other crates:
//! - Transcript records (input rows and annotated output rows)
//! - Speaker roles and insight labels
//! - Per-message token arenas with backward/forward links
//! - The `MorphAnalyzer` trait for pluggable morphology backends
//! - Error types

pub mod error;
pub mod insight;
pub mod message;
pub mod record;
pub mod role;
pub mod token;
pub mod traits;

pub use error::{Error, Result};
pub use insight::{Annotation, InsightLabel};
pub use message::{Message, MessageId};
pub use record::{InsightRecord, TranscriptRecord, OUTPUT_HEADER};
pub use role::Role;
pub use token::{AnalyzedToken, MorphAnalysis, TokenAnalysis, TokenChain, TokenWindow};

// Trait re-exports
pub use traits::MorphAnalyzer;
