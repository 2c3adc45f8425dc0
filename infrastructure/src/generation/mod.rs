//! Generation service adapters

mod openai;

pub use openai::OpenAiGenerationClient;
