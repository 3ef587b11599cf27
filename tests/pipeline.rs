//! End-to-end pipeline scenarios with mock providers

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use scholar_rag::config::RagConfig;
use scholar_rag::error::{Error, Result};
use scholar_rag::pipeline::{
    RagPipeline, MSG_NO_ABSTRACTS, MSG_NO_CREDENTIAL, MSG_NO_PAPERS,
};
use scholar_rag::providers::{EmbeddingProvider, LlmProvider, PaperSearchProvider};
use scholar_rag::types::PaperRecord;

/// Search mock returning a fixed paper set and recording queries
struct MockSearch {
    papers: Vec<PaperRecord>,
    queries: Mutex<Vec<String>>,
}

impl MockSearch {
    fn new(papers: Vec<PaperRecord>) -> Arc<Self> {
        Arc::new(Self {
            papers,
            queries: Mutex::new(Vec::new()),
        })
    }

    fn recorded_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaperSearchProvider for MockSearch {
    async fn search(&self, query: &str, _api_key: &str) -> Vec<PaperRecord> {
        self.queries.lock().unwrap().push(query.to_string());
        self.papers.clone()
    }

    fn name(&self) -> &str {
        "mock-search"
    }
}

/// Deterministic embedder recording every embedded text
struct MockEmbedder {
    texts: Mutex<Vec<String>>,
}

impl MockEmbedder {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            texts: Mutex::new(Vec::new()),
        })
    }

    fn embedded_texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.texts.lock().unwrap().push(text.to_string());
        let sum: u32 = text.bytes().map(u32::from).sum();
        Ok(vec![1.0, (sum % 97) as f32 / 97.0, text.len() as f32])
    }

    fn dimensions(&self) -> usize {
        3
    }

    fn name(&self) -> &str {
        "mock-embedder"
    }
}

/// LLM mock with a canned answer
struct MockLlm {
    answer: String,
}

impl MockLlm {
    fn new(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: answer.to_string(),
        })
    }
}

#[async_trait]
impl LlmProvider for MockLlm {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.answer.clone())
    }

    fn is_configured(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "mock-llm"
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}

/// LLM mock whose generation always fails
struct FailingLlm;

#[async_trait]
impl LlmProvider for FailingLlm {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(Error::llm("model exploded"))
    }

    fn is_configured(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "failing-llm"
    }

    fn model(&self) -> &str {
        "failing-model"
    }
}

/// LLM mock without a credential
struct UnconfiguredLlm;

#[async_trait]
impl LlmProvider for UnconfiguredLlm {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(Error::llm("generate called on unconfigured provider"))
    }

    fn is_configured(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "unconfigured-llm"
    }

    fn model(&self) -> &str {
        "none"
    }
}

fn paper(title: &str, abstract_text: Option<&str>, url: &str) -> PaperRecord {
    PaperRecord::from_raw(
        Some(title.to_string()),
        abstract_text.map(str::to_string),
        Some(url.to_string()),
    )
}

#[tokio::test]
async fn scenario_a_no_papers_found() {
    let search = MockSearch::new(Vec::new());
    let pipeline = RagPipeline::with_providers(
        RagConfig::default(),
        search.clone(),
        MockEmbedder::new(),
        MockLlm::new("unused"),
    );

    let result = pipeline.process_query("what is a transformer", "s2-key").await;

    assert_eq!(result.answer, MSG_NO_PAPERS);
    assert!(result.sources.is_empty());
    assert!(!result.metrics.is_error);
    assert_eq!(result.metrics.sources_found, 0);
    assert_eq!(result.metrics.docs_retrieved, 0);
}

#[tokio::test]
async fn scenario_b_papers_without_abstracts() {
    let search = MockSearch::new(vec![
        paper("Paper One", None, "https://a.example/1"),
        paper("Paper Two", None, "https://a.example/2"),
    ]);
    let pipeline = RagPipeline::with_providers(
        RagConfig::default(),
        search,
        MockEmbedder::new(),
        MockLlm::new("unused"),
    );

    let result = pipeline.process_query("what is entropy", "s2-key").await;

    assert_eq!(result.answer, MSG_NO_ABSTRACTS);
    assert_ne!(result.answer, MSG_NO_PAPERS);
    assert!(!result.metrics.is_error);
    assert_eq!(result.metrics.sources_found, 2);
    assert_eq!(result.metrics.docs_retrieved, 0);
}

#[tokio::test]
async fn scenario_c_sources_are_deduplicated() {
    // Three chunks, two distinct URLs: the source set must have two entries.
    let search = MockSearch::new(vec![
        paper(
            "Survey Part I",
            Some("Graph networks operate on structured data."),
            "https://a.example/survey",
        ),
        paper(
            "Survey Part II",
            Some("Message passing aggregates neighbor features."),
            "https://a.example/survey",
        ),
        paper(
            "Applications",
            Some("Applications include molecules and social graphs."),
            "https://b.example/applications",
        ),
    ]);

    let mut config = RagConfig::default();
    config.retrieval.top_k = 3;

    let pipeline = RagPipeline::with_providers(
        config,
        search,
        MockEmbedder::new(),
        MockLlm::new("Graph neural networks are neural models over graphs."),
    );

    let result = pipeline.process_query("what is a graph network", "s2-key").await;

    assert!(!result.metrics.is_error);
    assert_eq!(result.metrics.sources_found, 3);
    assert_eq!(result.metrics.docs_retrieved, 3);
    assert_eq!(result.sources.len(), 2);
    assert!(result.sources.contains("https://a.example/survey"));
    assert!(result.sources.contains("https://b.example/applications"));
    assert_eq!(
        result.answer,
        "Graph neural networks are neural models over graphs."
    );
}

#[tokio::test]
async fn scenario_d_llm_failure_becomes_error_result() {
    let search = MockSearch::new(vec![paper(
        "A Paper",
        Some("A long enough abstract about the topic at hand."),
        "https://a.example/p",
    )]);
    let pipeline = RagPipeline::with_providers(
        RagConfig::default(),
        search,
        MockEmbedder::new(),
        Arc::new(FailingLlm),
    );

    let result = pipeline.process_query("what is the topic", "s2-key").await;

    assert!(result.metrics.is_error);
    assert!(result.answer.contains("model exploded"));
    assert!(result.answer.starts_with("An error occurred:"));
    assert!(result.sources.is_empty());
    assert_eq!(result.metrics.docs_retrieved, 1);
}

#[tokio::test]
async fn missing_credential_short_circuits_without_network_calls() {
    let search = MockSearch::new(vec![paper(
        "Never Fetched",
        Some("Should not be reached."),
        "https://a.example/p",
    )]);
    let embedder = MockEmbedder::new();
    let pipeline = RagPipeline::with_providers(
        RagConfig::default(),
        search.clone(),
        embedder.clone(),
        Arc::new(UnconfiguredLlm),
    );

    let result = pipeline.process_query("what is anything", "s2-key").await;

    assert!(result.metrics.is_error);
    assert_eq!(result.answer, MSG_NO_CREDENTIAL);
    assert!(search.recorded_queries().is_empty());
    assert!(embedder.embedded_texts().is_empty());
}

#[tokio::test]
async fn search_uses_refined_query_but_retrieval_uses_original() {
    let search = MockSearch::new(vec![paper(
        "GNN Paper",
        Some("Graph neural networks process graph-structured inputs."),
        "https://a.example/gnn",
    )]);
    let embedder = MockEmbedder::new();
    let pipeline = RagPipeline::with_providers(
        RagConfig::default(),
        search.clone(),
        embedder.clone(),
        MockLlm::new("answer"),
    );

    // No definitional trigger, so the search query gets the fixed prefix.
    let result = pipeline.process_query("graph neural networks", "s2-key").await;
    assert!(!result.metrics.is_error);

    assert_eq!(
        search.recorded_queries(),
        vec!["explanation and key concepts of graph neural networks".to_string()]
    );

    // The last embedded text is the retrieval query: the original, unrefined.
    let texts = embedder.embedded_texts();
    assert_eq!(texts.last().map(String::as_str), Some("graph neural networks"));
    assert!(texts
        .iter()
        .all(|t| !t.starts_with("explanation and key concepts of")));
}

#[tokio::test]
async fn already_definitional_query_is_searched_unchanged() {
    let search = MockSearch::new(Vec::new());
    let pipeline = RagPipeline::with_providers(
        RagConfig::default(),
        search.clone(),
        MockEmbedder::new(),
        MockLlm::new("unused"),
    );

    pipeline.process_query("what is federated learning", "s2-key").await;

    assert_eq!(
        search.recorded_queries(),
        vec!["what is federated learning".to_string()]
    );
}

#[tokio::test]
async fn every_terminal_path_yields_a_record_shape() {
    let search = MockSearch::new(Vec::new());
    let pipeline = RagPipeline::with_providers(
        RagConfig::default(),
        search,
        MockEmbedder::new(),
        MockLlm::new("unused"),
    );

    let result = pipeline.process_query("anything at all", "s2-key").await;
    let record = result.to_record("anything at all");

    assert_eq!(record.query, "anything at all");
    assert_eq!(record.answer, result.answer);
    assert_eq!(record.is_error, result.metrics.is_error);
    assert!(record.feedback_score.is_none());
}
