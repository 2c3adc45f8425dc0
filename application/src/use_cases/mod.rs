//! Use cases (application services)
//!
//! - [`reviewer_pool`] - validated, ordered rubric set of a run
//! - [`run_reviewer`] - one rubric's state-machine driven review of one chunk
//! - [`review_chunk`] - fan-out of every reviewer over one chunk
//! - [`process_chunks`] - driver over the pending chunks of the chunk source

pub mod process_chunks;
pub mod review_chunk;
pub mod reviewer_pool;
pub mod run_reviewer;

#[cfg(test)]
mod test_support;
