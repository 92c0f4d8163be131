use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::store::{StoreError, Workspace, WorkspaceStore};
use super::types::*;

const SNAPSHOT_FILE: &str = "workspace.json";

/// Durable backend: the whole workspace as one JSON snapshot, rewritten after
/// every mutation. A failed write leaves the in-memory state untouched.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    workspace: Mutex<Workspace>,
}

impl FileStore {
    /// Opens (or initialises) the snapshot under `dir`.
    pub async fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir).await?;
        let path = dir.join(SNAPSHOT_FILE);

        let workspace = if fs::try_exists(&path).await? {
            let content = fs::read_to_string(&path).await?;
            serde_json::from_str(&content)?
        } else {
            let empty = Workspace::default();
            write_snapshot(&path, &empty).await?;
            empty
        };

        debug!(
            "Loaded workspace snapshot from {} ({} tasks, {} notes, {} messages)",
            path.display(),
            workspace.tasks.len(),
            workspace.notes.len(),
            workspace.messages.len()
        );

        Ok(Self {
            path,
            workspace: Mutex::new(workspace),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn commit<T>(
        &self,
        op: impl FnOnce(&mut Workspace) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.workspace.lock().await;
        let mut next = guard.clone();
        let out = op(&mut next)?;
        write_snapshot(&self.path, &next).await?;
        *guard = next;
        Ok(out)
    }
}

async fn write_snapshot(path: &Path, workspace: &Workspace) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(workspace)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl WorkspaceStore for FileStore {
    async fn create_task(&self, text: &str) -> Result<Task, StoreError> {
        self.commit(|ws| Ok(ws.create_task(text))).await
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.workspace.lock().await.list_tasks())
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task, StoreError> {
        self.commit(|ws| ws.update_task(id, patch)).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), StoreError> {
        self.commit(|ws| {
            ws.delete_task(id);
            Ok(())
        })
        .await
    }

    async fn delete_all_tasks(&self) -> Result<(), StoreError> {
        self.commit(|ws| {
            ws.tasks.clear();
            Ok(())
        })
        .await
    }

    async fn create_note(&self, text: &str) -> Result<Note, StoreError> {
        self.commit(|ws| Ok(ws.create_note(text))).await
    }

    async fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.workspace.lock().await.list_notes())
    }

    async fn delete_note(&self, id: NoteId) -> Result<(), StoreError> {
        self.commit(|ws| {
            ws.delete_note(id);
            Ok(())
        })
        .await
    }

    async fn delete_all_notes(&self) -> Result<(), StoreError> {
        self.commit(|ws| {
            ws.notes.clear();
            Ok(())
        })
        .await
    }

    async fn create_message(&self, sender: Sender, text: &str) -> Result<Message, StoreError> {
        self.commit(|ws| Ok(ws.create_message(sender, text))).await
    }

    async fn list_messages(&self, limit: usize) -> Result<Vec<Message>, StoreError> {
        Ok(self.workspace.lock().await.list_messages(limit))
    }
}
