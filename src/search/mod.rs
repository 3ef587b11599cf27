//! Academic paper search: rule-based query refinement and the
//! Semantic Scholar client

pub mod client;
pub mod refine;

pub use client::SemanticScholarClient;
pub use refine::{refine_query, DEFINITIONAL_TRIGGERS, REFINE_PREFIX};
