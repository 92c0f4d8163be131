use serde::{Deserialize, Serialize};

/// The capability an utterance refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentKind {
    Weather,
    Quote,
    Joke,
    Encyclopedia,
    AddTask,
    AddNote,
    Calculate,
    Greeting,
    Help,
    Unknown,
}

/// Result of classifying one utterance. `slot` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub intent: IntentKind,
    pub slot: String,
}

impl Classification {
    pub fn new(intent: IntentKind, slot: impl Into<String>) -> Self {
        Self {
            intent,
            slot: slot.into(),
        }
    }

    pub fn bare(intent: IntentKind) -> Self {
        Self::new(intent, String::new())
    }
}

/// Values substituted when an utterance names no city or topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDefaults {
    pub city: String,
    pub topic: String,
}

impl Default for SlotDefaults {
    fn default() -> Self {
        Self {
            city: "delhi".to_string(),
            topic: "artificial intelligence".to_string(),
        }
    }
}
