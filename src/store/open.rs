use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use super::file::FileStore;
use super::memory::InMemoryStore;
use super::store::WorkspaceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Durable,
    InMemory,
}

/// Picks the backend once at startup. An unreachable durable store is not fatal.
pub async fn open_store(data_dir: Option<&Path>) -> (Arc<dyn WorkspaceStore>, StoreBackend) {
    if let Some(dir) = data_dir {
        match FileStore::open(dir).await {
            Ok(store) => {
                info!("Durable store ready at {}", store.path().display());
                return (Arc::new(store), StoreBackend::Durable);
            }
            Err(e) => {
                warn!("Durable store unavailable ({}), continuing with in-memory storage", e);
            }
        }
    } else {
        info!("No data directory configured, using in-memory storage");
    }

    (Arc::new(InMemoryStore::new()), StoreBackend::InMemory)
}
