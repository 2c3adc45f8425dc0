//! Configuration file loading for review-panel
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `REVIEW_PANEL_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./review-panel.toml` or `./.review-panel.toml`
//! 4. Global: `$XDG_CONFIG_HOME/review-panel/config.toml`
//! 5. Default values

mod file_config;
mod loader;
mod rubric_source;

pub use file_config::{
    ConfigValidationError, FileConfig, FileGenerationConfig, FileKnowledgeBaseConfig,
    FileLabelerConfig, FileReviewConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
pub use rubric_source::ConfigRubricSource;
