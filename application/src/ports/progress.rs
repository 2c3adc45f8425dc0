//! Progress notification port
//!
//! Defines the interface for reporting progress while chunks are reviewed.

use panel_domain::{Chunk, ChunkReport, ReviewerOutcome};

/// Callback for progress updates during chunk review
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, log, etc.)
pub trait ReviewProgressNotifier: Send + Sync {
    /// Called when a chunk's reviewers are spawned
    fn on_chunk_start(&self, chunk: &Chunk, total_reviewers: usize);

    /// Called as each reviewer reaches a terminal state
    fn on_reviewer_complete(&self, outcome: &ReviewerOutcome);

    /// Called once the chunk's report is aggregated
    fn on_chunk_complete(&self, report: &ChunkReport);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ReviewProgressNotifier for NoProgress {
    fn on_chunk_start(&self, _chunk: &Chunk, _total_reviewers: usize) {}
    fn on_reviewer_complete(&self, _outcome: &ReviewerOutcome) {}
    fn on_chunk_complete(&self, _report: &ChunkReport) {}
}
