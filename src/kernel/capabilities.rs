//! Capability adapters.
//!
//! # Invariants
//! - Every adapter resolves to an [`AdapterReply`]; errors and timeouts become
//!   the adapter's fallback sentence and are only logged.
//! - Each call is bounded by the configured timeout and is never retried.
//! - Only `add_task` and `add_note` write to the store.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::services::InfoSource;
use crate::store::WorkspaceStore;

pub const WEATHER_FALLBACK: &str = "Sorry, I couldn't fetch the weather right now.";
pub const DEFAULT_QUOTE: &str = "The only way to do great work is to love what you do. - Steve Jobs";
pub const DEFAULT_JOKE: &str = "Why did the voice assistant go to therapy? It had too many issues!";
pub const TASK_FALLBACK: &str = "Failed to add task.";
pub const NOTE_FALLBACK: &str = "Failed to save note.";

const SUMMARY_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterReply {
    pub text: String,
}

impl AdapterReply {
    fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

pub fn encyclopedia_fallback(topic: &str) -> String {
    format!("Sorry, I couldn't find information about {}.", topic)
}

#[derive(Clone)]
pub struct Capabilities {
    info: Arc<dyn InfoSource>,
    store: Arc<dyn WorkspaceStore>,
    timeout: Duration,
}

impl Capabilities {
    pub fn new(info: Arc<dyn InfoSource>, store: Arc<dyn WorkspaceStore>, timeout: Duration) -> Self {
        Self { info, store, timeout }
    }

    /// Runs `call` under the timeout. `None` means "use the fallback".
    async fn bounded<T, E: Display>(
        &self,
        capability: &str,
        call: impl Future<Output = Result<T, E>>,
    ) -> Option<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                warn!("{} failed: {}", capability, e);
                None
            }
            Err(_) => {
                warn!("{} timed out after {:?}", capability, self.timeout);
                None
            }
        }
    }

    pub async fn weather(&self, city: &str) -> AdapterReply {
        match self.bounded("Weather lookup", self.info.weather(city)).await {
            Some(report) => AdapterReply::new(format!(
                "Weather in {}: {}°C, {}. Humidity: {}%",
                report.city, report.temp_c, report.description, report.humidity
            )),
            None => AdapterReply::new(WEATHER_FALLBACK),
        }
    }

    pub async fn quote(&self) -> AdapterReply {
        match self.bounded("Quote lookup", self.info.quote()).await {
            Some(quote) => AdapterReply::new(format!(
                "{} - {}",
                quote.content,
                quote.author.as_deref().unwrap_or("Unknown")
            )),
            None => AdapterReply::new(DEFAULT_QUOTE),
        }
    }

    pub async fn joke(&self) -> AdapterReply {
        match self.bounded("Joke lookup", self.info.joke()).await.flatten() {
            Some(joke) => AdapterReply::new(joke),
            None => AdapterReply::new(DEFAULT_JOKE),
        }
    }

    pub async fn encyclopedia(&self, topic: &str) -> AdapterReply {
        match self.bounded("Encyclopedia lookup", self.info.summary(topic)).await {
            Some(summary) => {
                let head: String = summary.extract.chars().take(SUMMARY_CHARS).collect();
                AdapterReply::new(format!("{}: {}...", summary.title, head))
            }
            None => AdapterReply::new(encyclopedia_fallback(topic)),
        }
    }

    pub async fn add_task(&self, text: &str) -> AdapterReply {
        match self.bounded("Task creation", self.store.create_task(text)).await {
            Some(task) => AdapterReply::new(format!("Task added: {}", task.text)),
            None => AdapterReply::new(TASK_FALLBACK),
        }
    }

    pub async fn add_note(&self, text: &str) -> AdapterReply {
        match self.bounded("Note creation", self.store.create_note(text)).await {
            Some(note) => AdapterReply::new(format!("Note saved: {}", note.text)),
            None => AdapterReply::new(NOTE_FALLBACK),
        }
    }
}
