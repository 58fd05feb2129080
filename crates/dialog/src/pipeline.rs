//! Dialog analysis pipeline

use metrics::counter;

use call_insights_core::{Annotation, Message, MessageId, Result, Role, TranscriptRecord};
use call_insights_text_processing::MessageTokenizer;

use crate::{
    insight_metrics, CompanyNameMatcher, DialogBatch, DialogInsightState, GoodbyeMatcher,
    GreetingFlow, GreetingMatcher, InsightMatch, InsightMatcher, ManagerNameMatcher,
};

/// Runs transcript records through tokenizer, matchers and dialog state
///
/// Records are processed strictly in input order, one analyzer call per
/// record. Any error aborts the batch.
#[derive(Debug)]
pub struct DialogAnalysisPipeline {
    tokenizer: MessageTokenizer,
    greeting: GreetingMatcher,
    goodbye: GoodbyeMatcher,
    manager_name: ManagerNameMatcher,
    company_name: CompanyNameMatcher,
}

impl DialogAnalysisPipeline {
    pub fn new(tokenizer: MessageTokenizer) -> Self {
        Self {
            tokenizer,
            greeting: GreetingMatcher,
            goodbye: GoodbyeMatcher,
            manager_name: ManagerNameMatcher,
            company_name: CompanyNameMatcher,
        }
    }

    /// Process a whole batch of records
    pub async fn run<I>(&self, records: I) -> Result<DialogBatch>
    where
        I: IntoIterator<Item = TranscriptRecord>,
    {
        let mut batch = DialogBatch::new();
        for record in records {
            self.process_record(&mut batch, record).await?;
        }

        tracing::info!(
            dialogs = batch.len(),
            messages = batch.message_count(),
            "Dialog analysis complete"
        );

        Ok(batch)
    }

    /// Tokenize one record, scan it and append it to its dialog
    pub async fn process_record(
        &self,
        batch: &mut DialogBatch,
        record: TranscriptRecord,
    ) -> Result<()> {
        tracing::debug!(
            dlg_id = %record.dlg_id,
            line_n = record.line_n,
            text = %record.text,
            "Processing record"
        );

        let tokens = self.tokenizer.tokenize(&record.text).await?;

        let dialog = batch.dialog_entry(&record.dlg_id);
        let mut message = Message::new(
            record.dlg_id,
            dialog.next_message_id(),
            record.line_n,
            Role::from(record.role),
            record.text,
            tokens,
        );

        counter!(insight_metrics::MESSAGES_TOTAL, "role" => message.role.to_string()).increment(1);

        self.scan_message(dialog.insights_mut(), &mut message);
        dialog.add_message(message);
        Ok(())
    }

    /// Scan a message's token chain against the dialog state
    ///
    /// Only manager messages are scanned. Gating is re-evaluated for every
    /// token, so a greeting bound early in a message lets later tokens of
    /// the same message be scanned for a goodbye.
    pub fn scan_message(&self, state: &mut DialogInsightState, message: &mut Message) {
        if !message.role.is_manager() {
            return;
        }

        let Message {
            id,
            tokens,
            annotation,
            ..
        } = message;
        let id = *id;

        for window in tokens.windows() {
            match state.greeting_flow() {
                GreetingFlow::AwaitingGreeting => {
                    Self::apply(state, id, annotation, self.greeting.matches(&window));
                },
                GreetingFlow::AwaitingGoodbye => {
                    Self::apply(state, id, annotation, self.goodbye.matches(&window));
                },
                GreetingFlow::FlowComplete => state.require_manager(),
            }

            if state.manager_name_open() {
                Self::apply(state, id, annotation, self.manager_name.matches(&window));
            }

            if state.company_name_open_for(id) {
                Self::apply(state, id, annotation, self.company_name.matches(&window));
            }
        }
    }

    fn apply(
        state: &mut DialogInsightState,
        id: MessageId,
        annotation: &mut Annotation,
        hits: Vec<InsightMatch>,
    ) {
        for hit in hits {
            match hit {
                InsightMatch::Greeting => state.bind_greeting(id, annotation),
                InsightMatch::Goodbye => state.bind_goodbye(id, annotation),
                InsightMatch::ManagerName(name) => state.bind_manager_name(id, annotation, name),
                InsightMatch::CompanyName(name) => state.bind_company_name(id, annotation, name),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use call_insights_core::{MorphAnalysis, TokenAnalysis, TokenChain};
    use call_insights_text_processing::LexiconAnalyzer;
    use std::sync::Arc;

    fn pipeline() -> DialogAnalysisPipeline {
        DialogAnalysisPipeline::new(MessageTokenizer::new(Arc::new(LexiconAnalyzer::new())))
    }

    fn message(role: &str, words: &[(&str, &str, &str)]) -> Message {
        let tokens: TokenChain = words
            .iter()
            .map(|(surface, lemma, tag)| {
                TokenAnalysis::analyzed(
                    *surface,
                    MorphAnalysis {
                        lemma: Some(lemma.to_string()),
                        tag: Some(tag.to_string()),
                        weight: None,
                    },
                )
            })
            .collect();
        Message::new("1", MessageId(0), 1, Role::from(role), "", tokens)
    }

    #[test]
    fn test_non_manager_is_never_scanned() {
        let mut state = DialogInsightState::new();
        let mut msg = message("client", &[("Здравствуйте", "здравствовать", "V")]);
        pipeline().scan_message(&mut state, &mut msg);
        assert!(msg.annotation.is_empty());
        assert_eq!(state.greeting_flow(), GreetingFlow::AwaitingGreeting);
    }

    #[test]
    fn test_greeting_and_goodbye_in_one_message() {
        let mut state = DialogInsightState::new();
        let mut msg = message(
            "manager",
            &[
                ("Здравствуйте", "здравствовать", "V"),
                ("до", "до", "PR="),
                ("свидания", "свидание", "S,ср,неод=род,ед"),
                ("ну", "ну", "PART="),
            ],
        );
        pipeline().scan_message(&mut state, &mut msg);

        assert_eq!(msg.insight(), "greeting=true goodbye=true ");
        assert_eq!(state.greeting_flow(), GreetingFlow::FlowComplete);
        assert!(state.manager_requirement());
    }

    #[test]
    fn test_goodbye_before_greeting_is_ignored() {
        let mut state = DialogInsightState::new();
        let mut msg = message(
            "manager",
            &[
                ("до", "до", "PR="),
                ("свидания", "свидание", "S,ср,неод=род,ед"),
            ],
        );
        pipeline().scan_message(&mut state, &mut msg);
        assert!(msg.annotation.is_empty());
        assert_eq!(state.goodbye_message(), None);
    }

    #[test]
    fn test_company_binding_closed_for_other_messages() {
        let pipeline = pipeline();
        let mut state = DialogInsightState::new();
        let words = [
            ("это", "это", "SPRO"),
            ("компания", "компания", "S,жен,неод=им,ед"),
            ("Ромашка", "ромашка", "S,жен,неод=им,ед"),
        ];

        let mut first = message("manager", &words);
        pipeline.scan_message(&mut state, &mut first);
        assert_eq!(state.company_name().unwrap().name, "Ромашка");

        let mut second = message("manager", &words);
        second.id = MessageId(1);
        pipeline.scan_message(&mut state, &mut second);
        assert_eq!(state.company_name().unwrap().message, MessageId(0));
        assert!(second.annotation.is_empty());
    }
}
