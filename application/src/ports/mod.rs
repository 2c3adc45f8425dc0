//! Port definitions (interfaces for external dependencies)
//!
//! Adapters for these live in the infrastructure and presentation layers.

pub mod chunk_source;
pub mod generation;
pub mod knowledge_base;
pub mod labeler;
pub mod progress;
pub mod result_sink;
pub mod rubric_source;
