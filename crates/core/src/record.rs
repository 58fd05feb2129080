//! Tabular transcript records

use serde::{Deserialize, Serialize};

use crate::Message;

/// Header of the annotated output file
pub const OUTPUT_HEADER: [&str; 5] = ["dlg_id", "line_n", "role", "text", "insight"];

/// One input transcript line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub dlg_id: String,
    pub line_n: u32,
    pub role: String,
    pub text: String,
}

/// One annotated output line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightRecord {
    pub dlg_id: String,
    pub line_n: u32,
    pub role: String,
    pub text: String,
    pub insight: String,
}

impl From<&Message> for InsightRecord {
    fn from(message: &Message) -> Self {
        Self {
            dlg_id: message.dialog_id.clone(),
            line_n: message.line,
            role: message.role.to_string(),
            text: message.text.clone(),
            insight: message.insight(),
        }
    }
}
