//! Process Chunks use case
//!
//! Drives pending chunks from the chunk source through labeling, review
//! and persistence, one chunk at a time.

use crate::ports::chunk_source::{ChunkSource, ChunkSourceError};
use crate::ports::labeler::TextLabeler;
use crate::ports::progress::{NoProgress, ReviewProgressNotifier};
use crate::ports::result_sink::ResultSink;
use crate::use_cases::review_chunk::ReviewChunkUseCase;
use panel_domain::{Chunk, ChunkReport, ReviewStatus};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that stop the driver before any chunk is reviewed
#[derive(Error, Debug)]
pub enum ProcessChunksError {
    #[error("Chunk source error: {0}")]
    Source(#[from] ChunkSourceError),
}

/// Which pending chunks to process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessMode {
    /// Every pending chunk
    #[default]
    All,
    /// Only the next pending chunk
    Next,
}

/// Chunks of one document reviewed during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentTally {
    pub processed: usize,
    pub complete: usize,
}

impl DocumentTally {
    pub fn pending(&self) -> usize {
        self.processed - self.complete
    }
}

/// Result of one driver run
#[derive(Debug, Default)]
pub struct ProcessSummary {
    /// Chunks reviewed
    pub processed: usize,
    pub complete: usize,
    pub pending: usize,
    /// Chunks whose report or status could not be persisted
    pub failed: usize,
    /// Run stopped by cancellation
    pub cancelled: bool,
    /// Per-document progress, keyed by document id
    pub documents: BTreeMap<String, DocumentTally>,
    pub reports: Vec<ChunkReport>,
}

impl ProcessSummary {
    fn record(&mut self, report: &ChunkReport) {
        let tally = self
            .documents
            .entry(report.document_id.clone())
            .or_default();
        self.processed += 1;
        tally.processed += 1;
        match report.overall_status {
            ReviewStatus::Complete => {
                self.complete += 1;
                tally.complete += 1;
            }
            ReviewStatus::Pending => self.pending += 1,
        }
        debug!(
            "Document {}: {}/{} reviewed chunk(s) complete",
            report.document_id, tally.complete, tally.processed
        );
    }
}

/// Use case for reviewing pending chunks
pub struct ProcessChunksUseCase {
    source: Arc<dyn ChunkSource>,
    sink: Arc<dyn ResultSink>,
    labeler: Arc<dyn TextLabeler>,
    review: ReviewChunkUseCase,
}

impl ProcessChunksUseCase {
    pub fn new(
        source: Arc<dyn ChunkSource>,
        sink: Arc<dyn ResultSink>,
        labeler: Arc<dyn TextLabeler>,
        review: ReviewChunkUseCase,
    ) -> Self {
        Self {
            source,
            sink,
            labeler,
            review,
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        mode: ProcessMode,
        cancel: &CancellationToken,
    ) -> Result<ProcessSummary, ProcessChunksError> {
        self.execute_with_progress(mode, cancel, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Persistence failures on one chunk are logged and counted; the driver
    /// moves on to the next chunk. Cancellation abandons the chunk in
    /// flight, which stays pending.
    pub async fn execute_with_progress(
        &self,
        mode: ProcessMode,
        cancel: &CancellationToken,
        progress: &dyn ReviewProgressNotifier,
    ) -> Result<ProcessSummary, ProcessChunksError> {
        let chunks = match mode {
            ProcessMode::All => self.source.pending_chunks().await?,
            ProcessMode::Next => self.source.next_pending().await?.into_iter().collect(),
        };
        info!("{} pending chunk(s) to review", chunks.len());

        let mut summary = ProcessSummary::default();

        for chunk in chunks {
            if cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            let (chunk, label_score) = self.label(chunk).await;
            let chunk_id = chunk.id.clone();

            let report = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    warn!("Cancelled while reviewing chunk {}, it stays pending", chunk_id);
                    summary.cancelled = true;
                    break;
                }
                report = self.review.execute_with_progress(chunk, progress) => report,
            };
            let report = match label_score {
                Some(score) => report.with_label_score(score),
                None => report,
            };

            summary.record(&report);

            if !self.persist(&report).await {
                summary.failed += 1;
            }
            summary.reports.push(report);
        }

        info!(
            "Processed {} chunk(s): {} complete, {} pending, {} failed",
            summary.processed, summary.complete, summary.pending, summary.failed
        );
        Ok(summary)
    }

    /// Attach a predicted label to an unlabeled chunk.
    async fn label(&self, chunk: Chunk) -> (Chunk, Option<f64>) {
        if chunk.predicted_label.is_some() {
            return (chunk, None);
        }

        match self.labeler.classify(&chunk.text).await {
            Ok(Some(prediction)) => {
                debug!(
                    "Chunk {} labeled '{}' ({:.3})",
                    chunk.id, prediction.label, prediction.score
                );
                let score = prediction.score;
                (chunk.with_predicted_label(prediction.label), Some(score))
            }
            Ok(None) => (chunk, None),
            Err(e) => {
                warn!("Labeling chunk {} failed, continuing unlabeled: {}", chunk.id, e);
                (chunk, None)
            }
        }
    }

    /// Save the report, then mark the chunk processed. A chunk whose report
    /// was not saved stays pending for the next run.
    async fn persist(&self, report: &ChunkReport) -> bool {
        let status = report.overall_status;

        if let Err(e) = self.sink.save(report, status).await {
            warn!("Saving report for chunk {} failed: {}", report.chunk_id, e);
            return false;
        }

        if let Err(e) = self.source.mark_processed(&report.chunk_id, status).await {
            warn!("Marking chunk {} processed failed: {}", report.chunk_id, e);
            return false;
        }

        true
    }
}
