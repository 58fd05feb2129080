//! Dialog messages

use serde::{Deserialize, Serialize};

use crate::{Annotation, Role, TokenChain};

/// Position of a message inside its dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub usize);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One transcript line of a dialog
///
/// The message owns its token chain and annotation; `dialog_id` and `id`
/// are the back-reference to the owning dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub dialog_id: String,
    pub id: MessageId,
    pub line: u32,
    pub role: Role,
    pub text: String,
    pub tokens: TokenChain,
    pub annotation: Annotation,
}

impl Message {
    pub fn new(
        dialog_id: impl Into<String>,
        id: MessageId,
        line: u32,
        role: Role,
        text: impl Into<String>,
        tokens: TokenChain,
    ) -> Self {
        Self {
            dialog_id: dialog_id.into(),
            id,
            line,
            role,
            text: text.into(),
            tokens,
            annotation: Annotation::new(),
        }
    }

    /// Rendered `insight` column
    pub fn insight(&self) -> String {
        self.annotation.to_string()
    }
}
