//! Per-dialog insight state
//!
//! Records which message claimed each insight category. The greeting and
//! goodbye categories form one slot driven by a small state machine:
//!
//! ```text
//! AwaitingGreeting ──bind_greeting──► AwaitingGoodbye ──bind_goodbye──► FlowComplete
//! ```
//!
//! Manager name and company name are independent `Unbound`/`Bound` slots.
//! Binding methods do not check whether a slot is already claimed; gating is
//! the pipeline's job.

use metrics::counter;
use serde::{Deserialize, Serialize};

use call_insights_core::{Annotation, InsightLabel, MessageId};

use crate::insight_metrics;

/// State of the greeting/goodbye slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GreetingFlow {
    /// No greeting bound yet
    AwaitingGreeting,
    /// Greeting bound, goodbye not yet
    AwaitingGoodbye,
    /// Both bound; terminal
    FlowComplete,
}

/// A binding that carries an extracted value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedBinding {
    pub message: MessageId,
    pub name: String,
}

/// Insight bindings of one dialog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogInsightState {
    greeting: Option<MessageId>,
    goodbye: Option<MessageId>,
    manager_name: Option<NamedBinding>,
    company_name: Option<NamedBinding>,
    manager_requirement: bool,
}

impl DialogInsightState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of the greeting/goodbye slot
    pub fn greeting_flow(&self) -> GreetingFlow {
        match (self.greeting, self.goodbye) {
            (None, _) => GreetingFlow::AwaitingGreeting,
            (Some(_), None) => GreetingFlow::AwaitingGoodbye,
            (Some(_), Some(_)) => GreetingFlow::FlowComplete,
        }
    }

    pub fn greeting_message(&self) -> Option<MessageId> {
        self.greeting
    }

    pub fn goodbye_message(&self) -> Option<MessageId> {
        self.goodbye
    }

    pub fn manager_name(&self) -> Option<&NamedBinding> {
        self.manager_name.as_ref()
    }

    pub fn company_name(&self) -> Option<&NamedBinding> {
        self.company_name.as_ref()
    }

    pub fn manager_requirement(&self) -> bool {
        self.manager_requirement
    }

    /// Whether the manager-name slot is still unclaimed
    pub fn manager_name_open(&self) -> bool {
        self.manager_name.is_none()
    }

    /// Whether the company-name matcher may run on `message`
    ///
    /// Open while unclaimed, and re-opened for the message that holds the
    /// current binding so later tokens of that message can overwrite it.
    pub fn company_name_open_for(&self, message: MessageId) -> bool {
        match &self.company_name {
            None => true,
            Some(binding) => binding.message == message,
        }
    }

    /// Mark that the greeting/goodbye flow completed before this token
    pub fn require_manager(&mut self) {
        self.manager_requirement = true;
    }

    pub fn bind_greeting(&mut self, message: MessageId, annotation: &mut Annotation) {
        self.greeting = Some(message);
        annotation.push(InsightLabel::Greeting);
        record_binding(InsightLabel::Greeting, message, None);
    }

    pub fn bind_goodbye(&mut self, message: MessageId, annotation: &mut Annotation) {
        self.goodbye = Some(message);
        annotation.push(InsightLabel::Goodbye);
        record_binding(InsightLabel::Goodbye, message, None);
    }

    pub fn bind_manager_name(
        &mut self,
        message: MessageId,
        annotation: &mut Annotation,
        name: impl Into<String>,
    ) {
        let name = name.into();
        annotation.push(InsightLabel::ManagerName);
        record_binding(InsightLabel::ManagerName, message, Some(&name));
        self.manager_name = Some(NamedBinding { message, name });
    }

    /// Bind or overwrite the company name
    ///
    /// The `c_name` label is appended at most once per message.
    pub fn bind_company_name(
        &mut self,
        message: MessageId,
        annotation: &mut Annotation,
        name: impl Into<String>,
    ) {
        let name = name.into();
        annotation.push_unique(InsightLabel::CompanyName);
        record_binding(InsightLabel::CompanyName, message, Some(&name));
        self.company_name = Some(NamedBinding { message, name });
    }
}

fn record_binding(label: InsightLabel, message: MessageId, value: Option<&str>) {
    counter!(insight_metrics::BINDINGS_TOTAL, "label" => label.key()).increment(1);
    tracing::debug!(
        insight = label.key(),
        message = %message,
        value = value.unwrap_or_default(),
        "Bound insight"
    );
}
