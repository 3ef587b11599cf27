//! Semantic Scholar search client with retry and degrade-to-empty

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::providers::paper_search::PaperSearchProvider;
use crate::types::PaperRecord;

/// Client for the Semantic Scholar paper search API.
///
/// Each attempt is bounded by the configured timeout; any failure (transport
/// error, non-2xx status, malformed body) is retried up to the configured
/// attempt count with a fixed delay in between. Exhausting retries yields an
/// empty result set rather than an error.
pub struct SemanticScholarClient {
    client: Client,
    config: SearchConfig,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<RawPaper>,
}

#[derive(Deserialize)]
struct RawPaper {
    title: Option<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    url: Option<String>,
}

impl SemanticScholarClient {
    /// Create a new search client
    pub fn new(config: &SearchConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config: config.clone(),
        }
    }

    /// Perform a single search attempt
    async fn attempt(&self, query: &str, api_key: &str) -> Result<Vec<PaperRecord>> {
        let limit = self.config.max_results.to_string();
        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("query", query),
                ("limit", limit.as_str()),
                ("fields", "title,abstract,url"),
            ])
            .header("x-api-key", api_key)
            .send()
            .await
            .map_err(|e| Error::search(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::search(format!(
                "Search failed: HTTP {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::search(format!("Failed to parse search response: {}", e)))?;

        Ok(body
            .data
            .into_iter()
            .map(|p| PaperRecord::from_raw(p.title, p.abstract_text, p.url))
            .collect())
    }
}

#[async_trait]
impl PaperSearchProvider for SemanticScholarClient {
    async fn search(&self, query: &str, api_key: &str) -> Vec<PaperRecord> {
        for attempt in 0..self.config.retry_attempts {
            match self.attempt(query, api_key).await {
                Ok(papers) => {
                    tracing::info!("Search returned {} papers", papers.len());
                    return papers;
                }
                Err(e) => {
                    tracing::warn!(
                        "Search attempt {}/{} failed: {}",
                        attempt + 1,
                        self.config.retry_attempts,
                        e
                    );
                    if attempt + 1 < self.config.retry_attempts {
                        sleep(Duration::from_secs(self.config.retry_delay_secs)).await;
                    }
                }
            }
        }

        tracing::warn!("Search retries exhausted, degrading to empty result set");
        Vec::new()
    }

    fn name(&self) -> &str {
        "semantic-scholar"
    }
}
