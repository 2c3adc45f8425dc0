//! Result sink port
//!
//! Defines the interface for persisting chunk reports.

use async_trait::async_trait;
use panel_domain::{ChunkReport, ReviewStatus};
use thiserror::Error;

/// Errors that can occur while persisting reports
#[derive(Error, Debug)]
pub enum ResultSinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Destination for chunk reports
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Persist one report together with the chunk's overall status
    async fn save(&self, report: &ChunkReport, status: ReviewStatus) -> Result<(), ResultSinkError>;
}
