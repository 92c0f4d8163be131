use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::InputMode;

/// Outcome of one listening session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenEvent {
    /// A complete, finalized utterance. The only outcome that leads to dispatch.
    Utterance(String),
    /// Listening stopped before an utterance was complete.
    Stopped,
    /// The recognizer reported a problem.
    Error(String),
    /// No more input will ever arrive.
    Closed,
}

/// Receives finalized transcripts, one per line, from an external recognizer.
pub struct TranscriptListener<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> TranscriptListener<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// One session: at most one utterance. Cancelling stops it without a result.
    pub async fn listen(&mut self, cancel: &CancellationToken) -> ListenEvent {
        tokio::select! {
            _ = cancel.cancelled() => ListenEvent::Stopped,
            line = self.lines.next_line() => match line {
                Ok(Some(text)) => {
                    let text = text.trim();
                    if text.is_empty() {
                        ListenEvent::Stopped
                    } else {
                        debug!("Heard {:?}", text);
                        ListenEvent::Utterance(text.to_string())
                    }
                }
                Ok(None) => ListenEvent::Closed,
                Err(e) => ListenEvent::Error(e.to_string()),
            },
        }
    }
}

/// `None` when speech input is unavailable in this environment.
pub fn detect(mode: InputMode) -> Option<TranscriptListener<BufReader<Stdin>>> {
    match mode {
        InputMode::Stdin => Some(TranscriptListener::new(BufReader::new(tokio::io::stdin()))),
        InputMode::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn one_utterance_per_session() {
        let input: &[u8] = b"weather in paris\n\n  tell me a joke  \n";
        let mut listener = TranscriptListener::new(input);
        let cancel = CancellationToken::new();

        assert_eq!(listener.listen(&cancel).await, ListenEvent::Utterance("weather in paris".into()));
        assert_eq!(listener.listen(&cancel).await, ListenEvent::Stopped);
        assert_eq!(listener.listen(&cancel).await, ListenEvent::Utterance("tell me a joke".into()));
        assert_eq!(listener.listen(&cancel).await, ListenEvent::Closed);
    }

    #[tokio::test]
    async fn cancelled_session_yields_nothing() {
        let (_writer, reader) = tokio::io::duplex(64);
        let mut listener = TranscriptListener::new(BufReader::new(reader));
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert_eq!(listener.listen(&cancel).await, ListenEvent::Stopped);
    }
}
