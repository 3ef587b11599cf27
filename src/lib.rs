//! scholar-rag: academic research assistant RAG pipeline
//!
//! This crate answers a natural-language research question by searching
//! Semantic Scholar for paper abstracts, indexing them into an ephemeral
//! per-query vector index, retrieving the most relevant chunks, and
//! synthesizing a grounded, cited answer with an LLM.
//!
//! The pipeline is stateless between calls: each [`RagPipeline::process_query`]
//! invocation builds and discards its own index. Presentation, persistence of
//! interaction logs, and secrets management belong to the caller.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod search;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use pipeline::RagPipeline;
pub use types::{
    paper::{Chunk, PaperRecord, NO_ABSTRACT_SENTINEL},
    response::{InteractionRecord, PipelineResult, QueryMetrics},
};
