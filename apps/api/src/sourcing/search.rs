//! External search collaborator — a soft dependency behind a trait.
//!
//! `AppState` carries `Arc<dyn SearchProvider>` so the HTTP-backed provider
//! can be swapped for a canned one in tests. Failures and rate limits are the
//! provider's normal weather: the orchestrator logs them and moves on to the
//! next platform.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// One external search hit. No ordering or completeness guarantees.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs `query` restricted to `site` and returns whatever the provider
    /// has. An empty vec is a valid answer.
    async fn search(&self, query: &str, site: &str) -> Result<Vec<SearchResult>, SearchError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// Full-text web search over a JSON HTTP API.
#[derive(Clone)]
pub struct HttpSearchProvider {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpSearchProvider {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(20))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    async fn search(&self, query: &str, site: &str) -> Result<Vec<SearchResult>, SearchError> {
        let q = format!("site:{site} {query}");
        debug!("Search query: {q}");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", q.as_str())])
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.results)
    }
}
