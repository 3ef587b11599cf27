//! Ephemeral per-query vector retrieval

pub mod index;

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ingestion::RecursiveSplitter;
use crate::providers::EmbeddingProvider;
use crate::types::{Chunk, PaperRecord};

pub use index::{ScoredChunk, VectorIndex};

/// Builds a transient vector index from a batch of paper records.
///
/// The index lives for a single pipeline invocation and is dropped with it;
/// there is no persistence and no cross-request cache.
pub struct IndexBuilder {
    splitter: RecursiveSplitter,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl IndexBuilder {
    /// Create a new index builder
    pub fn new(splitter: RecursiveSplitter, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { splitter, embedder }
    }

    /// Chunk every usable abstract, embed the chunks, and build a fresh
    /// index. Papers whose abstract is the missing-abstract sentinel are
    /// skipped; ending up with zero chunks is a hard failure
    /// ([`Error::NoIndexableContent`]), never an empty index.
    pub async fn build(&self, papers: &[PaperRecord]) -> Result<VectorIndex> {
        let mut chunks = Vec::new();

        for paper in papers {
            if !paper.has_abstract() {
                continue;
            }
            for text in self.splitter.split(&paper.abstract_text) {
                chunks.push(Chunk::new(text, paper.url.clone()));
            }
        }

        if chunks.is_empty() {
            return Err(Error::NoIndexableContent);
        }

        tracing::debug!("Embedding {} chunks from {} papers", chunks.len(), papers.len());

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let mut index = VectorIndex::new();
        for (embedding, chunk) in embeddings.into_iter().zip(chunks) {
            index.insert(embedding, chunk);
        }
        Ok(index)
    }
}
