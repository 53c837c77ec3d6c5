//! Tavily search API client.
//!
//! Posts the [`SearchRequest`] as JSON to `https://api.tavily.com/search`
//! and reads the `results` array. Each result must carry `title`, `url` and
//! `content`; extra fields (score, raw content, published date) are ignored.

use super::{SearchProvider, SearchRequest};
use crate::error::{Error, Result};
use crate::models::Article;
use crate::utils::truncate_for_log;
use serde::Deserialize;
use std::fmt;
use std::time::Instant;
use tracing::{info, instrument, warn};

pub const DEFAULT_ENDPOINT: &str = "https://api.tavily.com/search";

const SERVICE: &str = "tavily";

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    results: Vec<Article>,
}

/// Tavily client. The API key is checked when a search is made, not here.
pub struct TavilyClient {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl fmt::Debug for TavilyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TavilyClient")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl TavilyClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl SearchProvider for TavilyClient {
    #[instrument(level = "info", skip_all, fields(query = %request.query))]
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Article>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(Error::MissingCredential("TAVILY_API_KEY"))?;

        let t0 = Instant::now();
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let elapsed_ms = t0.elapsed().as_millis();

        if !status.is_success() {
            warn!(%status, elapsed_ms, body = %truncate_for_log(&body, 300), "Tavily search failed");
            return Err(Error::Status {
                service: SERVICE,
                status,
                body,
            });
        }

        let articles = parse_results(&body)?;
        info!(elapsed_ms, count = articles.len(), "Tavily search succeeded");
        Ok(articles)
    }
}

fn parse_results(body: &str) -> Result<Vec<Article>> {
    serde_json::from_str::<TavilyResponse>(body)
        .map(|response| response.results)
        .map_err(|e| Error::MalformedResponse {
            service: SERVICE,
            reason: e.to_string(),
        })
}
