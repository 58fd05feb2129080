//! Dialogs

use call_insights_core::{Message, MessageId};

use crate::DialogInsightState;

/// One transcribed call
///
/// Owns its messages and its insight state; nothing is shared with other
/// dialogs of the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    id: String,
    messages: Vec<Message>,
    insights: DialogInsightState,
}

impl Dialog {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
            insights: DialogInsightState::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.get(id.0)
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Id the next added message will receive
    pub fn next_message_id(&self) -> MessageId {
        MessageId(self.messages.len())
    }

    pub fn insights(&self) -> &DialogInsightState {
        &self.insights
    }

    pub(crate) fn insights_mut(&mut self) -> &mut DialogInsightState {
        &mut self.insights
    }

    /// Append a scanned message
    pub(crate) fn add_message(&mut self, message: Message) {
        debug_assert_eq!(message.id, self.next_message_id());
        debug_assert_eq!(message.dialog_id, self.id);
        self.messages.push(message);
    }

    /// Extracted manager name, if disclosed
    pub fn manager_name(&self) -> Option<&str> {
        self.insights.manager_name().map(|b| b.name.as_str())
    }

    /// Extracted company name, if disclosed
    pub fn company_name(&self) -> Option<&str> {
        self.insights.company_name().map(|b| b.name.as_str())
    }
}
