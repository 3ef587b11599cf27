//! Paper search provider trait

use async_trait::async_trait;

use crate::types::PaperRecord;

/// Trait for external bibliographic search.
///
/// Empty results are a first-class expected outcome, not a fault:
/// implementations retry transient failures internally and degrade to an
/// empty `Vec` when retries are exhausted, so the orchestrator can present a
/// clean "no papers found" result instead of a crash.
#[async_trait]
pub trait PaperSearchProvider: Send + Sync {
    /// Search for papers matching the query
    async fn search(&self, query: &str, api_key: &str) -> Vec<PaperRecord>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
