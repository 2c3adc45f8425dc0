//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw storage configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// JSONL chunk file
    pub chunks: PathBuf,
    /// JSONL report file, appended to
    pub results: PathBuf,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            chunks: PathBuf::from("chunks.jsonl"),
            results: PathBuf::from("results.jsonl"),
        }
    }
}
