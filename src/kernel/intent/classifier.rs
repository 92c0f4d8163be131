use super::slots;
use super::types::*;

/// One entry in the ordered predicate chain.
///
/// `matches` sees the lowercased utterance; `extract` sees the utterance as given,
/// so captured slots keep their original casing.
#[derive(Clone, Copy)]
pub struct IntentRule {
    pub intent: IntentKind,
    pub matches: fn(&str) -> bool,
    pub extract: fn(&str, &SlotDefaults) -> String,
}

impl std::fmt::Debug for IntentRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentRule").field("intent", &self.intent).finish()
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn is_weather(t: &str) -> bool {
    t.contains("weather")
}

fn is_quote(t: &str) -> bool {
    contains_any(t, &["quote", "inspiration"])
}

fn is_joke(t: &str) -> bool {
    contains_any(t, &["joke", "funny"])
}

fn is_encyclopedia(t: &str) -> bool {
    contains_any(t, &["wiki", "tell me about", "what is"])
}

fn is_task(t: &str) -> bool {
    contains_any(t, &["task", "todo", "remind me"])
}

fn is_note(t: &str) -> bool {
    contains_any(t, &["note", "remember", "save"])
}

/// Keywords, or any digit / arithmetic symbol anywhere in the text.
fn is_calculation(t: &str) -> bool {
    contains_any(t, &["calculate", "math"])
        || t.chars()
            .any(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')'))
}

fn is_greeting(t: &str) -> bool {
    contains_any(t, &["hello", "hi", "hey"])
}

fn is_help(t: &str) -> bool {
    contains_any(t, &["help", "what can you do"])
}

/// First match wins. Predicates overlap, so the order here is part of the behaviour.
pub static RULES: [IntentRule; 9] = [
    IntentRule { intent: IntentKind::Weather, matches: is_weather, extract: slots::city },
    IntentRule { intent: IntentKind::Quote, matches: is_quote, extract: slots::none },
    IntentRule { intent: IntentKind::Joke, matches: is_joke, extract: slots::none },
    IntentRule { intent: IntentKind::Encyclopedia, matches: is_encyclopedia, extract: slots::topic },
    IntentRule { intent: IntentKind::AddTask, matches: is_task, extract: slots::task_text },
    IntentRule { intent: IntentKind::AddNote, matches: is_note, extract: slots::note_text },
    IntentRule { intent: IntentKind::Calculate, matches: is_calculation, extract: slots::expression },
    IntentRule { intent: IntentKind::Greeting, matches: is_greeting, extract: slots::none },
    IntentRule { intent: IntentKind::Help, matches: is_help, extract: slots::none },
];

#[derive(Debug, Clone)]
pub struct Classifier {
    rules: &'static [IntentRule],
    defaults: SlotDefaults,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(SlotDefaults::default())
    }
}

impl Classifier {
    pub fn new(defaults: SlotDefaults) -> Self {
        Self {
            rules: &RULES,
            defaults,
        }
    }

    /// Walks the rule chain and returns the first hit, or `Unknown`.
    pub fn classify(&self, utterance: &str) -> Classification {
        let folded = utterance.to_lowercase();

        self.rules
            .iter()
            .find(|rule| (rule.matches)(&folded))
            .map(|rule| Classification::new(rule.intent, (rule.extract)(utterance, &self.defaults)))
            .unwrap_or_else(|| Classification::bare(IntentKind::Unknown))
    }
}

/// Classify with the stock fallback city and topic.
pub fn classify(utterance: &str) -> Classification {
    Classifier::default().classify(utterance)
}
