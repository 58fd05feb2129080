//! Insight labels and per-message annotations

use serde::{Deserialize, Serialize};

/// Insight categories a message can be annotated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightLabel {
    /// Manager greeted the customer
    Greeting,
    /// Manager said goodbye
    Goodbye,
    /// Manager disclosed their name
    ManagerName,
    /// Manager disclosed the company name
    CompanyName,
}

impl InsightLabel {
    /// Label text as written to the `insight` column
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightLabel::Greeting => "greeting=true",
            InsightLabel::Goodbye => "goodbye=true",
            InsightLabel::ManagerName => "m_name=true",
            InsightLabel::CompanyName => "c_name=true",
        }
    }

    /// Short name used as a metrics/log label
    pub fn key(&self) -> &'static str {
        match self {
            InsightLabel::Greeting => "greeting",
            InsightLabel::Goodbye => "goodbye",
            InsightLabel::ManagerName => "m_name",
            InsightLabel::CompanyName => "c_name",
        }
    }
}

impl std::fmt::Display for InsightLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labels attached to one message, in the order they were bound
///
/// The same label may appear more than once; only the company-name binding
/// guards against duplicates (see `push_unique`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    labels: Vec<InsightLabel>,
}

impl Annotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label
    pub fn push(&mut self, label: InsightLabel) {
        self.labels.push(label);
    }

    /// Append a label unless it is already present
    ///
    /// Returns `true` when the label was appended.
    pub fn push_unique(&mut self, label: InsightLabel) -> bool {
        if self.contains(label) {
            return false;
        }
        self.labels.push(label);
        true
    }

    pub fn contains(&self, label: InsightLabel) -> bool {
        self.labels.contains(&label)
    }

    pub fn labels(&self) -> &[InsightLabel] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Renders the `insight` column: every label followed by one space
impl std::fmt::Display for Annotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for label in &self.labels {
            write!(f, "{} ", label)?;
        }
        Ok(())
    }
}
