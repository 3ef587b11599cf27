//! Core data types for the RAG pipeline

pub mod paper;
pub mod response;

pub use paper::{Chunk, PaperRecord, NO_ABSTRACT_SENTINEL};
pub use response::{InteractionRecord, PipelineResult, QueryMetrics};
