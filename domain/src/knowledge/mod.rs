//! Reference knowledge consulted by reviewers.
//!
//! Knowledge items come either from the external knowledge base or from a
//! rubric's own reference list. [`ReferenceMaterial`] is what finally lands
//! in a reviewer prompt.

pub mod entities;
pub mod ranking;

pub use entities::{KnowledgeItem, ReferenceMaterial};
pub use ranking::{rank_items, relevance};
