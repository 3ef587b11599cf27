//! Grounded answer synthesis

pub mod prompt;
pub mod synthesizer;

pub use prompt::{PromptBuilder, ANSWER_PROMPT_VERSION, FALLBACK_ANSWER};
pub use synthesizer::AnswerSynthesizer;
