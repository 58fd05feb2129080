//! Context-sensitive insight matchers
//!
//! Each matcher looks at the current token and up to two preceding tokens
//! of the same message. Matchers are pure: they report matches and the
//! pipeline decides whether and how to bind them.

use call_insights_core::{InsightLabel, TokenWindow};

const GREETING_LEMMA: &str = "здравствовать";
const KIND_LEMMA: &str = "добрый";
const NOUN_TAG: &str = "S";

const UNTIL_LEMMA: &str = "до";
const PARTING_LEMMAS: &[&str] = &["свидание", "встреча"];
const ALL_SURFACE: &str = "всего";
const WISH_LEMMAS: &[&str] = &["добрый", "хороший"];

const NAME_TAG: &str = "S,имя";
const YES_SURFACE: &str = "да";
const THIS_LEMMA: &str = "это";
const CALL_LEMMA: &str = "звать";
const INTRO_LEMMAS: &[&str] = &["звать", "имя"];
const SELF_LEMMA: &str = "я";

const COMPANY_LEMMA: &str = "компания";
const VERB_TAG: &str = "V";
const ADVERB_TAG: &str = "ADV";

/// A rule hit on one token window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightMatch {
    Greeting,
    Goodbye,
    ManagerName(String),
    CompanyName(String),
}

/// A family of insight rules
pub trait InsightMatcher: Send + Sync {
    /// Category this matcher claims
    fn label(&self) -> InsightLabel;

    /// Rule hits for `window`, in rule order
    ///
    /// Every hit is one binding; a single window may hit more than one rule.
    fn matches(&self, window: &TokenWindow<'_>) -> Vec<InsightMatch>;
}

/// "Здравствуйте", "Добрый день"
#[derive(Debug, Clone, Copy, Default)]
pub struct GreetingMatcher;

impl InsightMatcher for GreetingMatcher {
    fn label(&self) -> InsightLabel {
        InsightLabel::Greeting
    }

    fn matches(&self, window: &TokenWindow<'_>) -> Vec<InsightMatch> {
        let current = window.current;
        let mut hits = Vec::new();

        if current.lemma_is(GREETING_LEMMA) {
            hits.push(InsightMatch::Greeting);
        }

        if let Some(previous) = window.previous {
            if previous.lemma_is(KIND_LEMMA) && current.tag_starts_with(NOUN_TAG) {
                hits.push(InsightMatch::Greeting);
            }
        }

        hits
    }
}

/// "До свидания", "Всего доброго"
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodbyeMatcher;

impl InsightMatcher for GoodbyeMatcher {
    fn label(&self) -> InsightLabel {
        InsightLabel::Goodbye
    }

    fn matches(&self, window: &TokenWindow<'_>) -> Vec<InsightMatch> {
        let Some(previous) = window.previous else {
            return Vec::new();
        };
        let current = window.current;
        let mut hits = Vec::new();

        if previous.lemma_is(UNTIL_LEMMA) && current.lemma_in(PARTING_LEMMAS) {
            hits.push(InsightMatch::Goodbye);
        }

        if previous.surface_is(ALL_SURFACE) && current.lemma_in(WISH_LEMMAS) {
            hits.push(InsightMatch::Goodbye);
        }

        hits
    }
}

/// "Да, это Анна", "Меня зовут Анна", "Меня Анна зовут"
#[derive(Debug, Clone, Copy, Default)]
pub struct ManagerNameMatcher;

impl InsightMatcher for ManagerNameMatcher {
    fn label(&self) -> InsightLabel {
        InsightLabel::ManagerName
    }

    fn matches(&self, window: &TokenWindow<'_>) -> Vec<InsightMatch> {
        let (Some(previous), Some(before_previous)) = (window.previous, window.before_previous)
        else {
            return Vec::new();
        };
        let current = window.current;
        let mut hits = Vec::new();

        if current.tag_starts_with(NAME_TAG) {
            if previous.lemma_is(THIS_LEMMA) && before_previous.surface_is(YES_SURFACE) {
                hits.push(InsightMatch::ManagerName(current.surface.clone()));
            }

            if previous.lemma_in(INTRO_LEMMAS) && before_previous.lemma_is(SELF_LEMMA) {
                hits.push(InsightMatch::ManagerName(current.surface.clone()));
            }
        }

        // name precedes the verb
        if current.lemma_is(CALL_LEMMA)
            && previous.tag_starts_with(NAME_TAG)
            && before_previous.lemma_is(SELF_LEMMA)
        {
            hits.push(InsightMatch::ManagerName(previous.surface.clone()));
        }

        hits
    }
}

/// "... компания Ромашка", "... компания Ромашка Плюс"
#[derive(Debug, Clone, Copy, Default)]
pub struct CompanyNameMatcher;

impl CompanyNameMatcher {
    /// Part-of-speech guard on the current token
    ///
    /// Kept as the literal disjunction "not a verb OR not an adverb", which
    /// holds for every tag. Narrowing it to "neither verb nor adverb" would
    /// change which company names are extracted.
    #[allow(clippy::nonminimal_bool)]
    fn passes_tag_guard(tag: &str) -> bool {
        !tag.starts_with(VERB_TAG) || !tag.starts_with(ADVERB_TAG)
    }
}

impl InsightMatcher for CompanyNameMatcher {
    fn label(&self) -> InsightLabel {
        InsightLabel::CompanyName
    }

    fn matches(&self, window: &TokenWindow<'_>) -> Vec<InsightMatch> {
        let (Some(previous), Some(before_previous)) = (window.previous, window.before_previous)
        else {
            return Vec::new();
        };
        let current = window.current;
        if !Self::passes_tag_guard(&current.tag) {
            return Vec::new();
        }
        let mut hits = Vec::new();

        if previous.lemma_is(COMPANY_LEMMA) {
            hits.push(InsightMatch::CompanyName(current.surface.clone()));
        }

        if before_previous.lemma_is(COMPANY_LEMMA) {
            hits.push(InsightMatch::CompanyName(format!(
                "{} {}",
                previous.surface, current.surface
            )));
        }

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use call_insights_core::{MorphAnalysis, TokenAnalysis, TokenChain};

    fn chain(words: &[(&str, &str, &str)]) -> TokenChain {
        words
            .iter()
            .map(|(surface, lemma, tag)| {
                TokenAnalysis::analyzed(
                    *surface,
                    MorphAnalysis {
                        lemma: Some(lemma.to_string()),
                        tag: Some(tag.to_string()),
                        weight: Some(1.0),
                    },
                )
            })
            .collect()
    }

    fn hits(matcher: &dyn InsightMatcher, chain: &TokenChain) -> Vec<InsightMatch> {
        chain.windows().flat_map(|w| matcher.matches(&w)).collect()
    }

    #[test]
    fn test_greeting_lemma() {
        let tokens = chain(&[("Здравствуйте", "здравствовать", "V,несов,пе=пов,мн")]);
        assert_eq!(hits(&GreetingMatcher, &tokens), vec![InsightMatch::Greeting]);
    }

    #[test]
    fn test_greeting_kind_noun() {
        let tokens = chain(&[
            ("Добрый", "добрый", "A=(вин,ед,полн,муж,неод|им,ед,полн,муж)"),
            ("день", "день", "S,муж,неод=(вин,ед|им,ед)"),
        ]);
        assert_eq!(hits(&GreetingMatcher, &tokens), vec![InsightMatch::Greeting]);

        let tokens = chain(&[("день", "день", "S,муж,неод=им,ед")]);
        assert!(hits(&GreetingMatcher, &tokens).is_empty());

        // adjective after "добрый" is not a greeting
        let tokens = chain(&[
            ("добрый", "добрый", "A=им,ед,полн,муж"),
            ("старый", "старый", "A=им,ед,полн,муж"),
        ]);
        assert!(hits(&GreetingMatcher, &tokens).is_empty());
    }

    #[test]
    fn test_goodbye_rules() {
        let tokens = chain(&[("до", "до", "PR="), ("свидания", "свидание", "S,ср,неод=род,ед")]);
        assert_eq!(hits(&GoodbyeMatcher, &tokens), vec![InsightMatch::Goodbye]);

        let tokens = chain(&[("До", "до", "PR="), ("встречи", "встреча", "S,жен,неод=род,ед")]);
        assert_eq!(hits(&GoodbyeMatcher, &tokens), vec![InsightMatch::Goodbye]);

        let tokens = chain(&[
            ("Всего", "весь", "APRO=род,ед,сред"),
            ("хорошего", "хороший", "A=род,ед,полн,сред"),
        ]);
        assert_eq!(hits(&GoodbyeMatcher, &tokens), vec![InsightMatch::Goodbye]);

        // lone "свидание" without "до"
        let tokens = chain(&[("свидание", "свидание", "S,ср,неод=им,ед")]);
        assert!(hits(&GoodbyeMatcher, &tokens).is_empty());
    }

    #[test]
    fn test_manager_name_after_trigger() {
        let tokens = chain(&[
            ("Меня", "я", "SPRO,ед,1-л=вин"),
            ("зовут", "звать", "V,несов,пе=непрош,мн,изъяв,3-л"),
            ("Анна", "анна", "S,имя,жен,од=им,ед"),
        ]);
        assert_eq!(
            hits(&ManagerNameMatcher, &tokens),
            vec![InsightMatch::ManagerName("Анна".to_string())]
        );
    }

    #[test]
    fn test_manager_name_after_imya() {
        let tokens = chain(&[
            ("Меня", "я", "SPRO,ед,1-л=(вин|род)"),
            ("имя", "имя", "S,сред,неод=им,ед"),
            ("Анна", "анна", "S,имя,жен,од=им,ед"),
        ]);
        assert_eq!(
            hits(&ManagerNameMatcher, &tokens),
            vec![InsightMatch::ManagerName("Анна".to_string())]
        );

        // "имя" needs "я" two tokens back
        let tokens = chain(&[
            ("Её", "она", "SPRO,ед,3-л,жен=(вин|род)"),
            ("имя", "имя", "S,сред,неод=им,ед"),
            ("Анна", "анна", "S,имя,жен,од=им,ед"),
        ]);
        assert!(hits(&ManagerNameMatcher, &tokens).is_empty());
    }

    #[test]
    fn test_manager_name_da_eto() {
        let tokens = chain(&[
            ("Да", "да", "PART="),
            ("это", "это", "SPRO,ед,сред,неод=им"),
            ("Ольга", "ольга", "S,имя,жен,од=им,ед"),
        ]);
        assert_eq!(
            hits(&ManagerNameMatcher, &tokens),
            vec![InsightMatch::ManagerName("Ольга".to_string())]
        );
    }

    #[test]
    fn test_manager_name_before_verb() {
        let tokens = chain(&[
            ("Меня", "я", "SPRO,ед,1-л=вин"),
            ("Анна", "анна", "S,имя,жен,од=им,ед"),
            ("зовут", "звать", "V,несов,пе=непрош,мн,изъяв,3-л"),
        ]);
        assert_eq!(
            hits(&ManagerNameMatcher, &tokens),
            vec![InsightMatch::ManagerName("Анна".to_string())]
        );
    }

    #[test]
    fn test_bare_name_never_matches() {
        let tokens = chain(&[("Анна", "анна", "S,имя,жен,од=им,ед")]);
        assert!(hits(&ManagerNameMatcher, &tokens).is_empty());

        // two-token context is not enough
        let tokens = chain(&[
            ("зовут", "звать", "V,несов,пе=непрош,мн,изъяв,3-л"),
            ("Анна", "анна", "S,имя,жен,од=им,ед"),
        ]);
        assert!(hits(&ManagerNameMatcher, &tokens).is_empty());

        // wrong pronoun
        let tokens = chain(&[
            ("Его", "он", "SPRO,ед,3-л,муж=вин"),
            ("зовут", "звать", "V,несов,пе=непрош,мн,изъяв,3-л"),
            ("Иван", "иван", "S,имя,муж,од=им,ед"),
        ]);
        assert!(hits(&ManagerNameMatcher, &tokens).is_empty());
    }

    #[test]
    fn test_company_name_rules() {
        let tokens = chain(&[
            ("Это", "это", "SPRO,ед,сред,неод=им"),
            ("компания", "компания", "S,жен,неод=им,ед"),
            ("Ромашка", "ромашка", "S,жен,неод=им,ед"),
            ("Плюс", "плюс", "S,муж,неод=им,ед"),
        ]);
        assert_eq!(
            hits(&CompanyNameMatcher, &tokens),
            vec![
                InsightMatch::CompanyName("Ромашка".to_string()),
                InsightMatch::CompanyName("Ромашка Плюс".to_string()),
            ]
        );
    }

    #[test]
    fn test_company_name_needs_two_predecessors() {
        let tokens = chain(&[
            ("Компания", "компания", "S,жен,неод=им,ед"),
            ("Ромашка", "ромашка", "S,жен,неод=им,ед"),
        ]);
        assert!(hits(&CompanyNameMatcher, &tokens).is_empty());
    }

    #[test]
    fn test_company_guard_admits_verbs() {
        assert!(CompanyNameMatcher::passes_tag_guard("V,несов"));
        assert!(CompanyNameMatcher::passes_tag_guard("ADV="));
        assert!(CompanyNameMatcher::passes_tag_guard("S,жен"));

        let tokens = chain(&[
            ("наша", "наш", "APRO=им,ед,жен"),
            ("компания", "компания", "S,жен,неод=им,ед"),
            ("работает", "работать", "V,несов,нп=непрош,ед,изъяв,3-л"),
        ]);
        assert_eq!(
            hits(&CompanyNameMatcher, &tokens),
            vec![InsightMatch::CompanyName("работает".to_string())]
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(GreetingMatcher.label(), InsightLabel::Greeting);
        assert_eq!(GoodbyeMatcher.label(), InsightLabel::Goodbye);
        assert_eq!(ManagerNameMatcher.label(), InsightLabel::ManagerName);
        assert_eq!(CompanyNameMatcher.label(), InsightLabel::CompanyName);
    }
}
