//! Pipeline results and per-request metrics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Per-request outcome metrics, populated on every terminal path so the
/// caller can log outcome quality uniformly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryMetrics {
    /// Number of papers returned by the search API
    pub sources_found: usize,
    /// Number of chunks retrieved from the vector index
    pub docs_retrieved: usize,
    /// Wall-clock time from pipeline entry to return, in milliseconds
    pub response_time_ms: u64,
    /// Whether the request ended in an error state
    pub is_error: bool,
}

/// The structured result handed back across the pipeline boundary.
///
/// Fully owned by the caller once returned; the pipeline keeps no state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Generated answer, or a terminal status/error message
    pub answer: String,
    /// Deduplicated source URLs for the retrieved chunks
    pub sources: BTreeSet<String>,
    /// Outcome metrics
    pub metrics: QueryMetrics,
}

impl PipelineResult {
    /// Create a result with an answer and no sources
    pub fn message(answer: impl Into<String>, metrics: QueryMetrics) -> Self {
        Self {
            answer: answer.into(),
            sources: BTreeSet::new(),
            metrics,
        }
    }

    /// Create an error-flagged result
    pub fn error(answer: impl Into<String>, mut metrics: QueryMetrics) -> Self {
        metrics.is_error = true;
        Self::message(answer, metrics)
    }

    /// Convert into the flat record shape the caller's persistence layer
    /// accepts. Sources are joined with newlines; `feedback_score` starts
    /// empty and is filled in by the feedback capture layer, if any.
    pub fn to_record(&self, query: impl Into<String>) -> InteractionRecord {
        InteractionRecord {
            id: Uuid::new_v4(),
            query: query.into(),
            answer: self.answer.clone(),
            sources: self
                .sources
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join("\n"),
            response_time_ms: self.metrics.response_time_ms,
            sources_found: self.metrics.sources_found,
            docs_retrieved: self.metrics.docs_retrieved,
            is_error: self.metrics.is_error,
            feedback_score: None,
            created_at: Utc::now(),
        }
    }
}

/// Flat interaction row for the caller's monitoring store.
///
/// The pipeline never persists this itself; it only defines the contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Unique interaction ID
    pub id: Uuid,
    /// The raw user query
    pub query: String,
    /// Generated answer or terminal message
    pub answer: String,
    /// Newline-joined source URLs
    pub sources: String,
    /// Wall-clock response time in milliseconds
    pub response_time_ms: u64,
    /// Number of papers found by search
    pub sources_found: usize,
    /// Number of chunks retrieved
    pub docs_retrieved: usize,
    /// Whether the request ended in error
    pub is_error: bool,
    /// Optional user feedback score, set by the feedback layer
    pub feedback_score: Option<i32>,
    /// Record creation time
    pub created_at: DateTime<Utc>,
}
