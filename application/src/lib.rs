//! Application layer for review-panel
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ReviewParams;
pub use ports::{
    chunk_source::{ChunkSource, ChunkSourceError},
    generation::{GenerationClient, GenerationError},
    knowledge_base::{KnowledgeBase, KnowledgeBaseError, NoKnowledgeBase},
    labeler::{LabelerError, NoLabeler, TextLabeler},
    progress::{NoProgress, ReviewProgressNotifier},
    result_sink::{ResultSink, ResultSinkError},
    rubric_source::{RubricSource, RubricSourceError},
};
pub use use_cases::process_chunks::{
    DocumentTally, ProcessChunksError, ProcessChunksUseCase, ProcessMode, ProcessSummary,
};
pub use use_cases::review_chunk::ReviewChunkUseCase;
pub use use_cases::reviewer_pool::{ReviewerPool, ReviewerPoolError};
pub use use_cases::run_reviewer::{ReviewerClients, ReviewerTask};
