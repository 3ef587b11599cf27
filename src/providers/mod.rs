//! Provider abstractions for paper search, embeddings, and the LLM
//!
//! Trait seams let tests and alternative deployments swap the network-backed
//! implementations for in-process ones.

pub mod embedding;
pub mod gemini;
pub mod llm;
pub mod ollama;
pub mod paper_search;

pub use embedding::EmbeddingProvider;
pub use gemini::GeminiClient;
pub use llm::LlmProvider;
pub use ollama::OllamaEmbedder;
pub use paper_search::PaperSearchProvider;
