//! Dialog Insight Engine
//!
//! Scans the manager lines of transcribed sales calls for four insights:
//! greeting, goodbye, the manager's name and the company name.
//!
//! ## Architecture
//!
//! ```text
//! TranscriptRecord ──► MessageTokenizer ──► TokenChain
//!                                               │
//!                                               ▼
//!              ┌──────────── DialogAnalysisPipeline ────────────┐
//!              │  per token: gate on DialogInsightState, run     │
//!              │  Greeting/Goodbye/ManagerName/CompanyName       │
//!              │  matchers, apply bindings                       │
//!              └─────────────────────────────────────────────────┘
//!                                               │
//!                                               ▼
//!                        Dialog (messages + annotations) ──► InsightRecord
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let tokenizer = MessageTokenizer::new(analyzer);
//! let pipeline = DialogAnalysisPipeline::new(tokenizer);
//! let batch = pipeline.run(records).await?;
//! let rows = batch.records();
//! ```

pub mod batch;
pub mod dialog;
pub mod matchers;
pub mod pipeline;
pub mod state;

pub use batch::DialogBatch;
pub use dialog::Dialog;
pub use matchers::{
    CompanyNameMatcher, GoodbyeMatcher, GreetingMatcher, InsightMatch, InsightMatcher,
    ManagerNameMatcher,
};
pub use pipeline::DialogAnalysisPipeline;
pub use state::{DialogInsightState, GreetingFlow, NamedBinding};

/// Metric names recorded by the engine
pub mod insight_metrics {
    /// Bindings applied, labelled by insight
    pub const BINDINGS_TOTAL: &str = "call_insights_bindings_total";
    /// Messages processed, labelled by role
    pub const MESSAGES_TOTAL: &str = "call_insights_messages_total";
}
