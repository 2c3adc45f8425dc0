//! JSONL file storage for chunks and review results
//!
//! - [`JsonlChunkStore`] - chunk source with a `<file>.status.jsonl` sidecar
//! - [`JsonlResultSink`] - append-only chunk report log

mod jsonl_chunk_store;
mod jsonl_result_sink;

pub use jsonl_chunk_store::JsonlChunkStore;
pub use jsonl_result_sink::JsonlResultSink;
