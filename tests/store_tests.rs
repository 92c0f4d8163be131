use companion::store::*;
use std::sync::Arc;

async fn stores() -> Vec<(&'static str, Arc<dyn WorkspaceStore>, tempfile::TempDir)> {
    let dir = tempfile::tempdir().unwrap();
    let file = FileStore::open(dir.path()).await.unwrap();
    vec![
        ("memory", Arc::new(InMemoryStore::new()) as Arc<dyn WorkspaceStore>, tempfile::tempdir().unwrap()),
        ("file", Arc::new(file) as Arc<dyn WorkspaceStore>, dir),
    ]
}

#[tokio::test]
async fn test_task_round_trip() {
    for (name, store, _dir) in stores().await {
        store.create_task("buy milk").await.unwrap();
        let tasks = store.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1, "{}", name);
        assert_eq!(tasks[0].text, "buy milk", "{}", name);
        assert!(!tasks[0].done, "{}", name);
    }
}

#[tokio::test]
async fn test_delete_all_tasks_is_idempotent() {
    for (name, store, _dir) in stores().await {
        store.create_task("one").await.unwrap();
        store.create_task("two").await.unwrap();

        store.delete_all_tasks().await.unwrap();
        assert!(store.list_tasks().await.unwrap().is_empty(), "{}", name);

        store.delete_all_tasks().await.unwrap();
        assert!(store.list_tasks().await.unwrap().is_empty(), "{}", name);
    }
}

#[tokio::test]
async fn test_toggle_and_delete_task() {
    for (name, store, _dir) in stores().await {
        let task = store.create_task("water plants").await.unwrap();
        let other = store.create_task("pay rent").await.unwrap();

        let updated = store.update_task(task.id, TaskPatch::done(true)).await.unwrap();
        assert!(updated.done, "{}", name);
        assert_eq!(updated.id, task.id, "{}", name);
        assert_eq!(updated.text, "water plants", "{}", name);

        store.delete_task(task.id).await.unwrap();
        // Unknown ids are a no-op.
        store.delete_task(task.id).await.unwrap();

        let tasks = store.list_tasks().await.unwrap();
        assert_eq!(tasks, vec![other], "{}", name);

        let missing = store.update_task(task.id, TaskPatch::done(false)).await;
        assert!(matches!(missing, Err(StoreError::NotFound(id)) if id == task.id), "{}", name);
    }
}

#[tokio::test]
async fn test_lists_are_newest_first() {
    for (name, store, _dir) in stores().await {
        store.create_note("first").await.unwrap();
        store.create_note("second").await.unwrap();
        let texts: Vec<String> = store.list_notes().await.unwrap().into_iter().map(|n| n.text).collect();
        assert_eq!(texts, vec!["second", "first"], "{}", name);

        store.delete_all_notes().await.unwrap();
        store.delete_all_notes().await.unwrap();
        assert!(store.list_notes().await.unwrap().is_empty(), "{}", name);
    }
}

#[tokio::test]
async fn test_message_log_limit_and_retention() {
    for (name, store, _dir) in stores().await {
        for i in 0..(MESSAGE_RETENTION + 20) {
            store.create_message(Sender::You, &format!("m{}", i)).await.unwrap();
        }
        let recent = store.list_messages(3).await.unwrap();
        let texts: Vec<&str> = recent.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["m119", "m118", "m117"], "{}", name);

        let all = store.list_messages(usize::MAX).await.unwrap();
        assert_eq!(all.len(), MESSAGE_RETENTION, "{}", name);
        assert_eq!(all.last().unwrap().text, "m20", "{}", name);
        assert!(all.windows(2).all(|w| w[0].timestamp >= w[1].timestamp), "{}", name);
    }
}

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = FileStore::open(dir.path()).await.unwrap();
        let task = store.create_task("renew passport").await.unwrap();
        store.update_task(task.id, TaskPatch::done(true)).await.unwrap();
        store.create_note("locker 42").await.unwrap();
        store.create_message(Sender::Bot, "Task added: renew passport").await.unwrap();
    }

    let reopened = FileStore::open(dir.path()).await.unwrap();
    let tasks = reopened.list_tasks().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].done);
    assert_eq!(reopened.list_notes().await.unwrap()[0].text, "locker 42");
    let messages = reopened.list_messages(DEFAULT_HISTORY_LIMIT).await.unwrap();
    assert_eq!(messages[0].sender, Sender::Bot);
}

#[tokio::test]
async fn test_open_store_falls_back_to_memory() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"occupied").unwrap();

    let (store, backend) = open_store(Some(blocker.as_path())).await;
    assert_eq!(backend, StoreBackend::InMemory);
    store.create_task("still works").await.unwrap();
    assert_eq!(store.list_tasks().await.unwrap().len(), 1);

    let (_, backend) = open_store(Some(dir.path().join("data").as_path())).await;
    assert_eq!(backend, StoreBackend::Durable);

    let (_, backend) = open_store(None).await;
    assert_eq!(backend, StoreBackend::InMemory);
}
