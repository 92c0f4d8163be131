use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::lookup::*;
use crate::config::Endpoints;

#[derive(Clone)]
pub struct WebInfoSource {
    client: Client,
    endpoints: Endpoints,
}

#[derive(Deserialize)]
struct WttrResponse {
    current_condition: Vec<WttrCondition>,
}

#[derive(Deserialize)]
struct WttrCondition {
    #[serde(rename = "temp_C")]
    temp_c: String,
    humidity: String,
    #[serde(rename = "weatherDesc")]
    weather_desc: Vec<WttrValue>,
}

#[derive(Deserialize)]
struct WttrValue {
    value: String,
}

#[derive(Deserialize)]
struct QuotableResponse {
    content: String,
    author: Option<String>,
}

#[derive(Deserialize)]
struct JokeResponse {
    joke: Option<String>,
}

#[derive(Deserialize)]
struct WikiSummaryResponse {
    title: String,
    extract: String,
}

impl WebInfoSource {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoints,
        }
    }

    /// `base` with `segment` appended as one percent-encoded path segment.
    fn with_segment(base: &str, segment: &str) -> Result<Url, LookupError> {
        let mut url = Url::parse(base).map_err(|e| LookupError::Malformed(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Malformed(format!("{} cannot take a path", base)))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: Url) -> Result<T, LookupError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl InfoSource for WebInfoSource {
    async fn weather(&self, city: &str) -> Result<WeatherReport, LookupError> {
        let mut url = Self::with_segment(&self.endpoints.weather, city)?;
        url.query_pairs_mut().append_pair("format", "j1");

        let body: WttrResponse = self.get_json(url).await?;
        let current = body
            .current_condition
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::Malformed("no current_condition".to_string()))?;
        let description = current
            .weather_desc
            .into_iter()
            .next()
            .map(|d| d.value)
            .ok_or_else(|| LookupError::Malformed("no weatherDesc".to_string()))?;

        Ok(WeatherReport {
            city: city.to_string(),
            temp_c: current.temp_c,
            description,
            humidity: current.humidity,
        })
    }

    async fn quote(&self) -> Result<Quote, LookupError> {
        let url = Url::parse(&self.endpoints.quote).map_err(|e| LookupError::Malformed(e.to_string()))?;
        let body: QuotableResponse = self.get_json(url).await?;
        Ok(Quote {
            content: body.content,
            author: body.author.filter(|a| !a.trim().is_empty()),
        })
    }

    async fn joke(&self) -> Result<Option<String>, LookupError> {
        let url = Url::parse(&self.endpoints.joke).map_err(|e| LookupError::Malformed(e.to_string()))?;
        let body: JokeResponse = self.get_json(url).await?;
        Ok(body.joke.filter(|j| !j.trim().is_empty()))
    }

    async fn summary(&self, topic: &str) -> Result<Summary, LookupError> {
        let url = Self::with_segment(&self.endpoints.wiki, topic)?;
        match self.get_json::<WikiSummaryResponse>(url).await {
            Ok(body) => Ok(Summary {
                title: body.title,
                extract: body.extract,
            }),
            Err(LookupError::Status(_)) => Err(LookupError::NotFound(topic.to_string())),
            Err(e) => Err(e),
        }
    }
}
