//! JSON file backed knowledge base
//!
//! The file holds a JSON array of knowledge items:
//!
//! ```json
//! [{"topic": "...", "official_narrative": "...", "key_points": ["..."],
//!   "sensitive_aspects": [], "recommended_terminology": {}, "authoritative_sources": []}]
//! ```

use async_trait::async_trait;
use panel_application::ports::knowledge_base::{KnowledgeBase, KnowledgeBaseError};
use panel_domain::{KnowledgeItem, rank_items};
use std::path::Path;
use tracing::{info, warn};

/// Default number of items returned per lookup
pub const DEFAULT_LOOKUP_LIMIT: usize = 3;

/// In-memory knowledge base loaded from a JSON file
pub struct FileKnowledgeBase {
    items: Vec<KnowledgeItem>,
    limit: usize,
}

impl FileKnowledgeBase {
    pub fn from_items(items: Vec<KnowledgeItem>, limit: usize) -> Self {
        Self {
            items,
            limit: limit.max(1),
        }
    }

    /// Load items from `path`.
    ///
    /// Entries missing `topic`, `official_narrative` or `key_points` are
    /// skipped with a warning.
    pub fn load(path: impl AsRef<Path>, limit: usize) -> Result<Self, KnowledgeBaseError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            KnowledgeBaseError::Unavailable(format!("{}: {}", path.display(), e))
        })?;
        let items = Self::parse(&content)?;
        info!(
            "Loaded {} knowledge item(s) from {}",
            items.len(),
            path.display()
        );
        Ok(Self::from_items(items, limit))
    }

    fn parse(content: &str) -> Result<Vec<KnowledgeItem>, KnowledgeBaseError> {
        let entries: Vec<serde_json::Value> = serde_json::from_str(content)
            .map_err(|e| KnowledgeBaseError::InvalidData(e.to_string()))?;

        let mut items = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<KnowledgeItem>(entry) {
                Ok(item) if !item.topic.trim().is_empty() => items.push(item),
                Ok(_) => warn!("Skipping knowledge item #{}: blank topic", index),
                Err(e) => warn!("Skipping knowledge item #{}: {}", index, e),
            }
        }
        Ok(items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl KnowledgeBase for FileKnowledgeBase {
    async fn lookup(&self, query: &str) -> Result<Vec<KnowledgeItem>, KnowledgeBaseError> {
        Ok(rank_items(query, &self.items)
            .into_iter()
            .take(self.limit)
            .cloned()
            .collect())
    }
}
