use std::sync::Arc;
use tracing::warn;

use super::journal::Journal;
use crate::outputs::speech::SpeechSink;
use crate::store::{Message, Note, NoteId, Sender, Task, TaskId, TaskPatch, WorkspaceStore};

/// Direct task/note management from the presentation side. Bypasses the classifier.
///
/// Failures are reported as System messages in the log and never returned.
pub struct WorkspaceActions {
    store: Arc<dyn WorkspaceStore>,
    journal: Journal,
    speech: Arc<dyn SpeechSink>,
}

impl WorkspaceActions {
    pub fn new(store: Arc<dyn WorkspaceStore>, journal: Journal, speech: Arc<dyn SpeechSink>) -> Self {
        Self { store, journal, speech }
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.store.list_tasks().await.unwrap_or_else(|e| {
            warn!("Listing tasks failed: {}", e);
            Vec::new()
        })
    }

    pub async fn notes(&self) -> Vec<Note> {
        self.store.list_notes().await.unwrap_or_else(|e| {
            warn!("Listing notes failed: {}", e);
            Vec::new()
        })
    }

    /// Oldest first, ready for display.
    pub async fn history(&self, limit: usize) -> Vec<Message> {
        self.journal.flush().await;
        match self.store.list_messages(limit).await {
            Ok(mut messages) => {
                messages.reverse();
                messages
            }
            Err(e) => {
                warn!("Loading history failed: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn toggle_task(&self, id: TaskId, done: bool) -> Option<Task> {
        match self.store.update_task(id, TaskPatch::done(done)).await {
            Ok(task) => Some(task),
            Err(e) => {
                self.report("Failed to update task.", e);
                None
            }
        }
    }

    pub async fn delete_task(&self, id: TaskId) -> bool {
        match self.store.delete_task(id).await {
            Ok(()) => true,
            Err(e) => {
                self.report("Failed to delete task.", e);
                false
            }
        }
    }

    pub async fn clear_tasks(&self) -> bool {
        match self.store.delete_all_tasks().await {
            Ok(()) => {
                self.announce("All tasks cleared.");
                true
            }
            Err(e) => {
                self.report("Failed to clear tasks.", e);
                false
            }
        }
    }

    pub async fn delete_note(&self, id: NoteId) -> bool {
        match self.store.delete_note(id).await {
            Ok(()) => true,
            Err(e) => {
                self.report("Failed to delete note.", e);
                false
            }
        }
    }

    pub async fn clear_notes(&self) -> bool {
        match self.store.delete_all_notes().await {
            Ok(()) => {
                self.announce("All notes cleared.");
                true
            }
            Err(e) => {
                self.report("Failed to clear notes.", e);
                false
            }
        }
    }

    fn announce(&self, text: &str) {
        self.journal.append(Sender::Bot, text);
        self.speech.speak(text);
    }

    fn report(&self, notice: &str, err: impl std::fmt::Display) {
        warn!("{} ({})", notice, err);
        self.journal.append(Sender::System, notice);
    }
}
