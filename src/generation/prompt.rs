//! Prompt templates for grounded answer generation

use crate::retrieval::ScoredChunk;

/// Version of the answer prompt template, bumped on any wording change
pub const ANSWER_PROMPT_VERSION: u32 = 1;

/// Fallback sentence the model must emit verbatim when the supplied sources
/// are insufficient
pub const FALLBACK_ANSWER: &str =
    "I could not find a definitive answer in the provided sources.";

/// Prompt builder for the synthesis step
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the grounding context by concatenating chunk texts in retrieved
    /// order.
    pub fn build_context(chunks: &[ScoredChunk]) -> String {
        chunks
            .iter()
            .map(|c| c.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Build the full instructional prompt for answer generation.
    ///
    /// The grounding contract lives entirely in this template: exclusive
    /// reliance on the sources, a direct opening definition, cross-source
    /// synthesis, and the verbatim fallback sentence when sources are thin.
    pub fn build_answer_prompt(question: &str, context: &str) -> String {
        format!(
            r#"You are an expert research assistant and an excellent tutor. Your goal is to provide a clear, insightful, and helpful answer to the user's question.
Your answer must be based exclusively on the following sources. Do not use any other knowledge.
Follow these instructions precisely:
1. Begin your response with a direct and clear definition of the main topic.
2. After the definition, synthesize the key concepts, methodologies, and applications mentioned across all the provided sources.
3. Organize your answer logically. Use paragraphs to separate different ideas.
4. If the sources do not contain enough information to answer the question, you must state: "{fallback}"

SOURCES:
{context}

QUESTION:
{question}

YOUR HELPFUL AND DETAILED ANSWER:
"#,
            fallback = FALLBACK_ANSWER,
            context = context,
            question = question
        )
    }
}
