//! Dialogs of one batch run

use std::collections::HashMap;

use call_insights_core::InsightRecord;

use crate::Dialog;

/// Dialogs keyed by `dlg_id`, kept in first-appearance order
#[derive(Debug, Clone, Default)]
pub struct DialogBatch {
    dialogs: Vec<Dialog>,
    index: HashMap<String, usize>,
}

impl DialogBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dialog with `id`, created on first use
    pub fn dialog_entry(&mut self, id: &str) -> &mut Dialog {
        let position = match self.index.get(id) {
            Some(&position) => position,
            None => {
                let position = self.dialogs.len();
                self.dialogs.push(Dialog::new(id));
                self.index.insert(id.to_string(), position);
                tracing::debug!(dlg_id = id, "New dialog");
                position
            },
        };
        &mut self.dialogs[position]
    }

    pub fn get(&self, id: &str) -> Option<&Dialog> {
        self.index.get(id).map(|&position| &self.dialogs[position])
    }

    pub fn dialogs(&self) -> &[Dialog] {
        &self.dialogs
    }

    pub fn len(&self) -> usize {
        self.dialogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialogs.is_empty()
    }

    pub fn message_count(&self) -> usize {
        self.dialogs.iter().map(Dialog::message_count).sum()
    }

    /// Output rows grouped by dialog, messages in arrival order
    pub fn records(&self) -> Vec<InsightRecord> {
        self.dialogs
            .iter()
            .flat_map(|dialog| dialog.messages().iter().map(InsightRecord::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialogs_keep_first_appearance_order() {
        let mut batch = DialogBatch::new();
        batch.dialog_entry("b");
        batch.dialog_entry("a");
        batch.dialog_entry("b");

        let ids: Vec<_> = batch.dialogs().iter().map(Dialog::id).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(batch.len(), 2);
        assert!(batch.get("a").is_some());
        assert!(batch.get("c").is_none());
        assert_eq!(batch.message_count(), 0);
        assert!(batch.records().is_empty());
    }
}
