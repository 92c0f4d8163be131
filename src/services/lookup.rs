use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("malformed upstream response: {0}")]
    Malformed(String),
    #[error("nothing found for `{0}`")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub temp_c: String,
    pub description: String,
    pub humidity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub content: String,
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub title: String,
    pub extract: String,
}

/// Third-party information sources the assistant can read from.
#[async_trait]
pub trait InfoSource: Send + Sync {
    async fn weather(&self, city: &str) -> Result<WeatherReport, LookupError>;
    async fn quote(&self) -> Result<Quote, LookupError>;
    /// `Ok(None)` when the upstream answered without a joke.
    async fn joke(&self) -> Result<Option<String>, LookupError>;
    async fn summary(&self, topic: &str) -> Result<Summary, LookupError>;
}
