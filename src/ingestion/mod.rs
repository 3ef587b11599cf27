//! Abstract chunking for the ephemeral knowledge base

pub mod chunker;

pub use chunker::RecursiveSplitter;
