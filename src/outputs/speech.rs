use std::sync::Mutex;
use tokio::sync::oneshot;
use tracing::warn;

/// Vocalizes replies. Fire-and-forget: nothing is reported back.
pub trait SpeechSink: Send + Sync {
    fn speak(&self, text: &str);
}

/// Prints replies instead of speaking them.
#[derive(Debug, Default)]
pub struct ConsoleSpeech;

impl SpeechSink for ConsoleSpeech {
    fn speak(&self, text: &str) {
        println!("Bot: {}", text);
    }
}

/// Speaks through the system `say` program. A new reply cuts off the previous one.
#[derive(Debug, Default)]
pub struct SayCommand {
    current: Mutex<Option<oneshot::Sender<()>>>,
}

impl SayCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpeechSink for SayCommand {
    fn speak(&self, text: &str) {
        let Ok(mut current) = self.current.lock() else {
            warn!("Speech state poisoned; skipping reply");
            return;
        };
        if let Some(stop_tx) = current.take() {
            let _ = stop_tx.send(());
        }

        match tokio::process::Command::new("say")
            .arg(text)
            .kill_on_drop(true)
            .spawn()
        {
            Ok(mut child) => {
                let (stop_tx, mut stop_rx) = oneshot::channel();
                *current = Some(stop_tx);

                tokio::spawn(async move {
                    let interrupted = tokio::select! {
                        _ = child.wait() => false,
                        _ = &mut stop_rx => true,
                    };
                    if interrupted {
                        let _ = child.kill().await;
                    }
                });
            }
            Err(e) => warn!("Failed to spawn 'say': {}", e),
        }
    }
}
