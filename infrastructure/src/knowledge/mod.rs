//! Knowledge base adapters

mod file;

pub use file::{DEFAULT_LOOKUP_LIMIT, FileKnowledgeBase};
