//! Prompt domain
//!
//! Templates for the reviewer generation and self-evaluation calls.

mod template;

pub use template::ReviewPromptTemplate;
