//! Infrastructure layer for review-panel
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod generation;
pub mod http;
pub mod knowledge;
pub mod labeler;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigRubricSource, ConfigValidationError, FileConfig, FileGenerationConfig,
    FileKnowledgeBaseConfig, FileLabelerConfig, FileReviewConfig, FileStorageConfig,
};
pub use generation::OpenAiGenerationClient;
pub use http::HttpClientError;
pub use knowledge::FileKnowledgeBase;
pub use labeler::HttpZeroShotLabeler;
pub use storage::{JsonlChunkStore, JsonlResultSink};
