//! Knowledge base configuration from TOML (`[knowledge_base]` section)

use crate::knowledge::DEFAULT_LOOKUP_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw knowledge base configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileKnowledgeBaseConfig {
    /// JSON array of knowledge items. No knowledge base when unset.
    pub path: Option<PathBuf>,
    /// Maximum items returned per lookup.
    pub limit: usize,
}

impl Default for FileKnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            limit: DEFAULT_LOOKUP_LIMIT,
        }
    }
}
