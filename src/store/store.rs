use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::*;

/// Oldest messages beyond this count are dropped.
pub const MESSAGE_RETENTION: usize = 100;
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task {0} not found")]
    NotFound(TaskId),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence contract for tasks, notes and the conversation log.
///
/// Both backends must be indistinguishable to callers apart from durability.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    async fn create_task(&self, text: &str) -> Result<Task, StoreError>;
    /// Newest first.
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError>;
    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task, StoreError>;
    /// Deleting an unknown id is not an error.
    async fn delete_task(&self, id: TaskId) -> Result<(), StoreError>;
    async fn delete_all_tasks(&self) -> Result<(), StoreError>;

    async fn create_note(&self, text: &str) -> Result<Note, StoreError>;
    async fn list_notes(&self) -> Result<Vec<Note>, StoreError>;
    async fn delete_note(&self, id: NoteId) -> Result<(), StoreError>;
    async fn delete_all_notes(&self) -> Result<(), StoreError>;

    async fn create_message(&self, sender: Sender, text: &str) -> Result<Message, StoreError>;
    /// Most recent first, at most `limit` entries.
    async fn list_messages(&self, limit: usize) -> Result<Vec<Message>, StoreError>;
}

/// Plain workspace contents shared by every backend. Vectors are kept in
/// creation order; listing reverses them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub messages: Vec<Message>,
}

impl Workspace {
    pub fn create_task(&mut self, text: &str) -> Task {
        let task = Task {
            id: TaskId::new(),
            text: text.to_string(),
            done: false,
        };
        self.tasks.push(task.clone());
        task
    }

    pub fn list_tasks(&self) -> Vec<Task> {
        self.tasks.iter().rev().cloned().collect()
    }

    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Result<Task, StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        if let Some(text) = patch.text {
            task.text = text;
        }
        if let Some(done) = patch.done {
            task.done = done;
        }
        Ok(task.clone())
    }

    pub fn delete_task(&mut self, id: TaskId) {
        self.tasks.retain(|t| t.id != id);
    }

    pub fn create_note(&mut self, text: &str) -> Note {
        let note = Note {
            id: NoteId::new(),
            text: text.to_string(),
        };
        self.notes.push(note.clone());
        note
    }

    pub fn list_notes(&self) -> Vec<Note> {
        self.notes.iter().rev().cloned().collect()
    }

    pub fn delete_note(&mut self, id: NoteId) {
        self.notes.retain(|n| n.id != id);
    }

    pub fn create_message(&mut self, sender: Sender, text: &str) -> Message {
        let message = Message {
            sender,
            text: text.to_string(),
            timestamp: Utc::now(),
        };
        self.messages.push(message.clone());
        if self.messages.len() > MESSAGE_RETENTION {
            let excess = self.messages.len() - MESSAGE_RETENTION;
            self.messages.drain(..excess);
        }
        message
    }

    pub fn list_messages(&self, limit: usize) -> Vec<Message> {
        self.messages.iter().rev().take(limit).cloned().collect()
    }
}
