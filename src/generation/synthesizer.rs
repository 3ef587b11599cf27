//! Answer synthesis from retrieved chunks

use std::sync::Arc;

use crate::error::Result;
use crate::providers::LlmProvider;
use crate::retrieval::ScoredChunk;

use super::prompt::PromptBuilder;

/// Synthesizes a grounded answer from retrieved chunks via the LLM.
///
/// The model output is forwarded as-is; grounding is enforced only by the
/// prompt contract, not by inspecting the response.
pub struct AnswerSynthesizer {
    llm: Arc<dyn LlmProvider>,
}

impl AnswerSynthesizer {
    /// Create a new synthesizer
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Generate an answer to `question` grounded in `chunks`
    pub async fn synthesize(&self, question: &str, chunks: &[ScoredChunk]) -> Result<String> {
        let context = PromptBuilder::build_context(chunks);
        let prompt = PromptBuilder::build_answer_prompt(question, &context);

        tracing::info!(
            "Generating answer with {} ({} context chunks)",
            self.llm.model(),
            chunks.len()
        );

        self.llm.generate(&prompt).await
    }
}
