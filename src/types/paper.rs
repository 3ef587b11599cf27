//! Paper records and abstract chunks

use serde::{Deserialize, Serialize};

/// Sentinel for papers whose abstract is missing from the search response.
///
/// An explicit placeholder instead of an `Option` keeps downstream filtering
/// a simple equality check and matches what callers see in rendered output.
pub const NO_ABSTRACT_SENTINEL: &str = "No abstract available.";

/// Placeholder title for papers without one
pub const NO_TITLE_SENTINEL: &str = "No title";

/// Placeholder URL for papers without one
pub const NO_URL_SENTINEL: &str = "No URL";

/// A normalized academic paper from the search API.
///
/// Immutable once created; lives for a single pipeline invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Paper title
    pub title: String,
    /// Abstract text, or [`NO_ABSTRACT_SENTINEL`] when unavailable
    pub abstract_text: String,
    /// Canonical paper URL, used as the citation source
    pub url: String,
}

impl PaperRecord {
    /// Build a record from raw (possibly missing) API fields, normalizing
    /// every absent value to its sentinel.
    pub fn from_raw(
        title: Option<String>,
        abstract_text: Option<String>,
        url: Option<String>,
    ) -> Self {
        Self {
            title: title.unwrap_or_else(|| NO_TITLE_SENTINEL.to_string()),
            abstract_text: abstract_text
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| NO_ABSTRACT_SENTINEL.to_string()),
            url: url.unwrap_or_else(|| NO_URL_SENTINEL.to_string()),
        }
    }

    /// Whether this paper has an indexable abstract
    pub fn has_abstract(&self) -> bool {
        self.abstract_text != NO_ABSTRACT_SENTINEL
    }
}

/// A bounded-length piece of a paper abstract, the unit of embedding and
/// retrieval. Many chunks may reference the same paper URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text, at most `chunk_size` characters
    pub text: String,
    /// URL of the paper this chunk came from
    pub source_url: String,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(text: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_url: source_url.into(),
        }
    }
}
