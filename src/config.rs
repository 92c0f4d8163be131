use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::kernel::intent::SlotDefaults;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub weather: String,
    pub quote: String,
    pub joke: String,
    pub wiki: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            weather: "https://wttr.in".to_string(),
            quote: "https://api.quotable.io/random".to_string(),
            joke: "https://v2.jokeapi.dev/joke/Any?type=single".to_string(),
            wiki: "https://en.wikipedia.org/api/rest_v1/page/summary".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    /// Print replies to the console.
    Console,
    /// Speak replies with the system `say` program.
    Say,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Finalized transcripts arrive one per line on stdin.
    Stdin,
    /// No speech input available; log-only mode.
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub voice: Voice,
    pub input: InputMode,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            voice: Voice::Console,
            input: InputMode::Stdin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    /// Durable store location. `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    pub timeout_secs: u64,
    pub history_limit: usize,
    pub fallback_city: String,
    pub fallback_topic: String,
    pub endpoints: Endpoints,
    pub speech: SpeechConfig,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        let slots = SlotDefaults::default();
        Self {
            data_dir: None,
            timeout_secs: 5,
            history_limit: crate::store::DEFAULT_HISTORY_LIMIT,
            fallback_city: slots.city,
            fallback_topic: slots.topic,
            endpoints: Endpoints::default(),
            speech: SpeechConfig::default(),
        }
    }
}

impl CompanionConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn slot_defaults(&self) -> SlotDefaults {
        SlotDefaults {
            city: self.fallback_city.clone(),
            topic: self.fallback_topic.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = CompanionConfig::from_toml(
            r#"
            data_dir = "/tmp/companion"
            fallback_city = "london"

            [speech]
            voice = "say"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.data_dir, Some(PathBuf::from("/tmp/companion")));
        assert_eq!(cfg.fallback_city, "london");
        assert_eq!(cfg.fallback_topic, "artificial intelligence");
        assert_eq!(cfg.timeout(), Duration::from_secs(5));
        assert_eq!(cfg.speech.voice, Voice::Say);
        assert_eq!(cfg.speech.input, InputMode::Stdin);
        assert_eq!(cfg.endpoints, Endpoints::default());
    }
}
