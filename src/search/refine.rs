//! Rule-based query refinement for academic search
//!
//! Abstracts match better when the search targets conceptual/definitional
//! phrasing, so queries that do not already ask for a definition get a fixed
//! prefix. The refined query is used only for external search; retrieval and
//! synthesis always use the original query to preserve user intent.

/// Version of the refinement rules, bumped whenever the trigger list or
/// prefix changes
pub const REFINER_RULES_VERSION: u32 = 1;

/// Trigger phrases that mark a query as already definitional
pub const DEFINITIONAL_TRIGGERS: &[&str] = &[
    "definition",
    "explanation",
    "key concepts",
    "introduction to",
    "principles of",
    "overview of",
    "what is",
];

/// Prefix prepended to queries without a definitional trigger
pub const REFINE_PREFIX: &str = "explanation and key concepts of";

/// Refine a raw user query into a search-engine-friendly query.
///
/// Pure and infallible. Returns the input unchanged when it already contains
/// a definitional trigger (case-insensitive), otherwise prepends
/// [`REFINE_PREFIX`].
pub fn refine_query(query: &str) -> String {
    let lowered = query.to_lowercase();
    if DEFINITIONAL_TRIGGERS
        .iter()
        .any(|trigger| lowered.contains(trigger))
    {
        return query.to_string();
    }

    let refined = format!("{} {}", REFINE_PREFIX, query);
    tracing::debug!("Refined search query: {}", refined);
    refined
}
