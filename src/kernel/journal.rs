use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use crate::store::{Sender, WorkspaceStore};

enum JournalCommand {
    Append { sender: Sender, text: String },
    Flush(oneshot::Sender<()>),
}

/// Conversation log writer.
///
/// `append` never blocks the reply path: entries are queued to a single writer
/// task, which preserves their order. A failed write is logged and dropped.
#[derive(Clone)]
pub struct Journal {
    tx: mpsc::UnboundedSender<JournalCommand>,
}

impl Journal {
    /// Must be called from within a Tokio runtime.
    pub fn spawn(store: Arc<dyn WorkspaceStore>, timeout: Duration) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(cmd) = rx.recv().await {
                match cmd {
                    JournalCommand::Append { sender, text } => {
                        match tokio::time::timeout(timeout, store.create_message(sender, &text)).await {
                            Ok(Ok(_)) => {}
                            Ok(Err(e)) => warn!("Failed to persist {} message: {}", sender, e),
                            Err(_) => warn!("Persisting {} message timed out", sender),
                        }
                    }
                    JournalCommand::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
        });

        Self { tx }
    }

    pub fn append(&self, sender: Sender, text: impl Into<String>) {
        let cmd = JournalCommand::Append {
            sender,
            text: text.into(),
        };
        if self.tx.send(cmd).is_err() {
            warn!("Journal writer stopped; {} message dropped", sender);
        }
    }

    /// Resolves once every entry queued before this call has been attempted.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(JournalCommand::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }
}
