//! Chunk source port
//!
//! Defines the interface to the store holding chunks awaiting review.

use async_trait::async_trait;
use panel_domain::{Chunk, ReviewStatus};
use thiserror::Error;

/// Errors that can occur while reading or updating the chunk store
#[derive(Error, Debug)]
pub enum ChunkSourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid chunk record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    #[error("Unknown chunk: {0}")]
    UnknownChunk(String),
}

/// Store of chunks awaiting review
#[async_trait]
pub trait ChunkSource: Send + Sync {
    /// Every chunk not yet processed, in store order
    async fn pending_chunks(&self) -> Result<Vec<Chunk>, ChunkSourceError>;

    /// The first chunk not yet processed
    async fn next_pending(&self) -> Result<Option<Chunk>, ChunkSourceError>;

    /// Record that `chunk_id` was reviewed, with the resulting status
    async fn mark_processed(
        &self,
        chunk_id: &str,
        status: ReviewStatus,
    ) -> Result<(), ChunkSourceError>;
}
