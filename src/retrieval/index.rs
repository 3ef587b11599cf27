//! In-memory nearest-neighbor index over chunk embeddings
//!
//! An exact cosine-similarity scan. The chunk sets here are small (a handful
//! of abstracts split into chunks), so a linear scan beats the constant cost
//! of building an approximate structure that would be thrown away at the end
//! of the request anyway.

use crate::types::Chunk;

/// A chunk with its similarity to the query
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Cosine similarity to the query embedding (higher is more similar)
    pub similarity: f32,
}

/// Ephemeral vector index: (embedding, chunk) pairs with exact
/// nearest-neighbor search.
#[derive(Debug, Default)]
pub struct VectorIndex {
    entries: Vec<(Vec<f32>, Chunk)>,
}

impl VectorIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an embedded chunk
    pub fn insert(&mut self, embedding: Vec<f32>, chunk: Chunk) {
        self.entries.push((embedding, chunk));
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no chunks
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the `k` chunks most similar to the query embedding, ordered by
    /// descending similarity. Holding fewer than `k` chunks returns all of
    /// them.
    pub fn search(&self, query_embedding: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut results: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|(embedding, chunk)| ScoredChunk {
                chunk: chunk.clone(),
                similarity: cosine_similarity(query_embedding, embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(k);
        results
    }
}

/// Cosine similarity between two vectors. Zero-magnitude or
/// mismatched-length inputs score 0.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
