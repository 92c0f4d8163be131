use async_trait::async_trait;
use tokio::sync::Mutex;

use super::store::{StoreError, Workspace, WorkspaceStore};
use super::types::*;

/// Volatile backend used when no durable store is reachable.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    workspace: Mutex<Workspace>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkspaceStore for InMemoryStore {
    async fn create_task(&self, text: &str) -> Result<Task, StoreError> {
        Ok(self.workspace.lock().await.create_task(text))
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.workspace.lock().await.list_tasks())
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task, StoreError> {
        self.workspace.lock().await.update_task(id, patch)
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), StoreError> {
        self.workspace.lock().await.delete_task(id);
        Ok(())
    }

    async fn delete_all_tasks(&self) -> Result<(), StoreError> {
        self.workspace.lock().await.tasks.clear();
        Ok(())
    }

    async fn create_note(&self, text: &str) -> Result<Note, StoreError> {
        Ok(self.workspace.lock().await.create_note(text))
    }

    async fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.workspace.lock().await.list_notes())
    }

    async fn delete_note(&self, id: NoteId) -> Result<(), StoreError> {
        self.workspace.lock().await.delete_note(id);
        Ok(())
    }

    async fn delete_all_notes(&self) -> Result<(), StoreError> {
        self.workspace.lock().await.notes.clear();
        Ok(())
    }

    async fn create_message(&self, sender: Sender, text: &str) -> Result<Message, StoreError> {
        Ok(self.workspace.lock().await.create_message(sender, text))
    }

    async fn list_messages(&self, limit: usize) -> Result<Vec<Message>, StoreError> {
        Ok(self.workspace.lock().await.list_messages(limit))
    }
}
