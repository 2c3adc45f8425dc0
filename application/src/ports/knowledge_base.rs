//! Knowledge base port
//!
//! Defines the interface for retrieving reference material relevant to a
//! chunk of text.

use async_trait::async_trait;
use panel_domain::KnowledgeItem;
use thiserror::Error;

/// Errors that can occur during knowledge base lookups
#[derive(Error, Debug)]
pub enum KnowledgeBaseError {
    #[error("Knowledge base unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid knowledge base data: {0}")]
    InvalidData(String),
}

/// Source of reference knowledge items
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Items relevant to `query`, most relevant first. May be empty.
    async fn lookup(&self, query: &str) -> Result<Vec<KnowledgeItem>, KnowledgeBaseError>;
}

/// Knowledge base with no entries
///
/// Reviewers then fall back to their rubric's own reference items.
pub struct NoKnowledgeBase;

#[async_trait]
impl KnowledgeBase for NoKnowledgeBase {
    async fn lookup(&self, _query: &str) -> Result<Vec<KnowledgeItem>, KnowledgeBaseError> {
        Ok(Vec::new())
    }
}
