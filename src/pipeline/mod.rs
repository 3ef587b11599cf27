//! Pipeline orchestrator: refine, search, index, retrieve, synthesize
//!
//! The orchestrator maps every failure mode to a well-formed
//! [`PipelineResult`]; nothing propagates past [`RagPipeline::process_query`].

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use crate::config::RagConfig;
use crate::error::Error;
use crate::generation::AnswerSynthesizer;
use crate::ingestion::RecursiveSplitter;
use crate::providers::{
    EmbeddingProvider, GeminiClient, LlmProvider, OllamaEmbedder, PaperSearchProvider,
};
use crate::retrieval::IndexBuilder;
use crate::search::{refine_query, SemanticScholarClient};
use crate::types::{PipelineResult, QueryMetrics};

/// Terminal message when the LLM credential is missing
pub const MSG_NO_CREDENTIAL: &str = "Error: language model credential is not configured.";
/// Terminal message when search returns no papers
pub const MSG_NO_PAPERS: &str =
    "I could not find any relevant academic papers for this query.";
/// Terminal message when no usable abstracts were found
pub const MSG_NO_ABSTRACTS: &str =
    "No usable abstracts were found in the search results to build a knowledge base.";
/// Terminal message when retrieval returns no chunks
pub const MSG_NO_RETRIEVAL: &str =
    "Could not find a specific answer in the retrieved papers.";

/// The query-to-answer RAG pipeline.
///
/// Stateless between calls: each [`process_query`](Self::process_query)
/// builds its own vector index and discards it before returning. Concurrent
/// calls share nothing mutable.
pub struct RagPipeline {
    config: RagConfig,
    search: Arc<dyn PaperSearchProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
}

impl RagPipeline {
    /// Create a pipeline wired to the real providers: Semantic Scholar for
    /// search, Ollama for embeddings, and Gemini for generation.
    pub fn new(config: RagConfig) -> Self {
        let search = Arc::new(SemanticScholarClient::new(&config.search));
        let embedder = Arc::new(OllamaEmbedder::new(&config.embeddings));
        let llm = Arc::new(GeminiClient::new(&config.llm));
        Self::with_providers(config, search, embedder, llm)
    }

    /// Create a pipeline with explicit providers (tests, alternative
    /// backends).
    pub fn with_providers(
        config: RagConfig,
        search: Arc<dyn PaperSearchProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            config,
            search,
            embedder,
            llm,
        }
    }

    /// Answer a research query.
    ///
    /// Runs the full pipeline and always returns a well-formed result; every
    /// terminal path carries metrics, including elapsed wall-clock time.
    pub async fn process_query(&self, query: &str, api_key: &str) -> PipelineResult {
        let start = Instant::now();
        let mut metrics = QueryMetrics::default();

        // Precondition: never start network work without an LLM credential.
        if !self.llm.is_configured() {
            return finish(PipelineResult::error(MSG_NO_CREDENTIAL, metrics), start);
        }

        // The refined query broadens the search net; the original query is
        // kept for retrieval and synthesis to preserve user intent.
        let refined_query = refine_query(query);
        if refined_query != query {
            tracing::info!("Refined search query: {}", refined_query);
        }

        let papers = self.search.search(&refined_query, api_key).await;
        metrics.sources_found = papers.len();

        if papers.is_empty() {
            return finish(PipelineResult::message(MSG_NO_PAPERS, metrics), start);
        }

        let splitter = RecursiveSplitter::new(
            self.config.chunking.chunk_size,
            self.config.chunking.chunk_overlap,
        );
        let builder = IndexBuilder::new(splitter, Arc::clone(&self.embedder));

        // The index is a local value: built here, dropped at return.
        let index = match builder.build(&papers).await {
            Ok(index) => index,
            Err(Error::NoIndexableContent) => {
                return finish(PipelineResult::message(MSG_NO_ABSTRACTS, metrics), start);
            }
            Err(e) => {
                return finish(
                    PipelineResult::error(format!("An error occurred: {}", e), metrics),
                    start,
                );
            }
        };
        tracing::debug!("Built ephemeral index with {} chunks", index.len());

        let query_embedding = match self.embedder.embed(query).await {
            Ok(embedding) => embedding,
            Err(e) => {
                return finish(
                    PipelineResult::error(format!("An error occurred: {}", e), metrics),
                    start,
                );
            }
        };

        let retrieved = index.search(&query_embedding, self.config.retrieval.top_k);
        metrics.docs_retrieved = retrieved.len();

        if retrieved.is_empty() {
            return finish(PipelineResult::message(MSG_NO_RETRIEVAL, metrics), start);
        }

        let synthesizer = AnswerSynthesizer::new(Arc::clone(&self.llm));
        let answer = match synthesizer.synthesize(query, &retrieved).await {
            Ok(answer) => answer,
            Err(e) => {
                return finish(
                    PipelineResult::error(format!("An error occurred: {}", e), metrics),
                    start,
                );
            }
        };

        let sources: BTreeSet<String> = retrieved
            .into_iter()
            .map(|r| r.chunk.source_url)
            .collect();

        finish(
            PipelineResult {
                answer,
                sources,
                metrics,
            },
            start,
        )
    }
}

/// Stamp elapsed time onto a terminal result
fn finish(mut result: PipelineResult, start: Instant) -> PipelineResult {
    result.metrics.response_time_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        "Query completed in {}ms ({} sources, {} chunks, error: {})",
        result.metrics.response_time_ms,
        result.metrics.sources_found,
        result.metrics.docs_retrieved,
        result.metrics.is_error
    );
    result
}
