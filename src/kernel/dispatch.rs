use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::arithmetic::{evaluate, format_number, is_safe_expression};
use super::capabilities::*;
use super::intent::{Classification, Classifier, IntentKind};
use super::journal::Journal;
use crate::outputs::speech::SpeechSink;
use crate::store::Sender;

pub const TASK_CLARIFICATION: &str = "What task would you like me to add?";
pub const NOTE_CLARIFICATION: &str = "What would you like me to remember?";
pub const CALCULATION_CLARIFICATION: &str =
    "I couldn't understand that calculation. Try saying numbers and operators.";
pub const GREETING_REPLY: &str = "Hello! I'm your voice companion. I can help with weather, quotes, tasks, notes, Wikipedia searches, jokes, and math!";
pub const HELP_REPLY: &str = "I can: Get weather (say 'weather in [city]'), tell quotes, jokes, search Wikipedia (say 'wiki [topic]'), manage tasks and notes, calculate math, and remember our conversation!";
pub const UNKNOWN_REPLY: &str = "I can help with weather, quotes, tasks, notes, Wikipedia, jokes, or math. Try saying one of those, or ask for help!";

/// Utterance in, one reply out.
///
/// Every call logs the utterance, classifies it, routes it, logs the reply and
/// hands the reply to the speech sink. Nothing inside can make it fail.
pub struct Dispatcher {
    classifier: Classifier,
    capabilities: Capabilities,
    journal: Journal,
    speech: Arc<dyn SpeechSink>,
}

impl Dispatcher {
    pub fn new(
        classifier: Classifier,
        capabilities: Capabilities,
        journal: Journal,
        speech: Arc<dyn SpeechSink>,
    ) -> Self {
        Self {
            classifier,
            capabilities,
            journal,
            speech,
        }
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub async fn handle(&self, utterance: &str) -> String {
        self.journal.append(Sender::You, utterance);

        let classification = self.classifier.classify(&utterance.to_lowercase());
        debug!("Classified {:?} as {:?}", utterance, classification);
        info!("Dispatching {:?}", classification.intent);

        let reply = match AssertUnwindSafe(self.respond(&classification)).catch_unwind().await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("{:?} produced an empty reply", classification.intent);
                fallback_for(&classification)
            }
            Err(_) => {
                warn!("{:?} handler panicked; using fallback", classification.intent);
                fallback_for(&classification)
            }
        };

        self.journal.append(Sender::Bot, reply.clone());
        self.speech.speak(&reply);
        reply
    }

    async fn respond(&self, classification: &Classification) -> String {
        let slot = classification.slot.as_str();
        let caps = &self.capabilities;

        match classification.intent {
            IntentKind::Weather => caps.weather(slot).await.text,
            IntentKind::Quote => caps.quote().await.text,
            IntentKind::Joke => caps.joke().await.text,
            IntentKind::Encyclopedia => caps.encyclopedia(slot).await.text,
            IntentKind::AddTask if slot.is_empty() => TASK_CLARIFICATION.to_string(),
            IntentKind::AddTask => caps.add_task(slot).await.text,
            IntentKind::AddNote if slot.is_empty() => NOTE_CLARIFICATION.to_string(),
            IntentKind::AddNote => caps.add_note(slot).await.text,
            IntentKind::Calculate => calculate(slot),
            IntentKind::Greeting => GREETING_REPLY.to_string(),
            IntentKind::Help => HELP_REPLY.to_string(),
            IntentKind::Unknown => UNKNOWN_REPLY.to_string(),
        }
    }
}

/// Evaluates an extracted expression, or asks the user to rephrase.
pub fn calculate(expr: &str) -> String {
    if !is_safe_expression(expr) {
        return CALCULATION_CLARIFICATION.to_string();
    }
    match evaluate(expr) {
        Ok(value) => format!("The result is {}", format_number(value)),
        Err(e) => {
            debug!("Could not evaluate {:?}: {}", expr, e);
            CALCULATION_CLARIFICATION.to_string()
        }
    }
}

/// The sentence a branch falls back to when its handler cannot answer.
pub fn fallback_for(classification: &Classification) -> String {
    match classification.intent {
        IntentKind::Weather => WEATHER_FALLBACK.to_string(),
        IntentKind::Quote => DEFAULT_QUOTE.to_string(),
        IntentKind::Joke => DEFAULT_JOKE.to_string(),
        IntentKind::Encyclopedia => encyclopedia_fallback(&classification.slot),
        IntentKind::AddTask => TASK_FALLBACK.to_string(),
        IntentKind::AddNote => NOTE_FALLBACK.to_string(),
        IntentKind::Calculate => CALCULATION_CLARIFICATION.to_string(),
        IntentKind::Greeting => GREETING_REPLY.to_string(),
        IntentKind::Help => HELP_REPLY.to_string(),
        IntentKind::Unknown => UNKNOWN_REPLY.to_string(),
    }
}
