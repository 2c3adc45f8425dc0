//! Review Chunk use case
//!
//! Fans one chunk out to every reviewer of the pool and folds their
//! outcomes into a [`ChunkReport`].

use crate::config::ReviewParams;
use crate::ports::progress::{NoProgress, ReviewProgressNotifier};
use crate::use_cases::reviewer_pool::ReviewerPool;
use crate::use_cases::run_reviewer::{ReviewerClients, ReviewerTask};
use panel_domain::{Chunk, ChunkReport, ReviewerOutcome};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Use case for reviewing one chunk against every rubric of the pool
pub struct ReviewChunkUseCase {
    tasks: Vec<ReviewerTask>,
}

impl ReviewChunkUseCase {
    pub fn new(pool: &ReviewerPool, clients: ReviewerClients, params: ReviewParams) -> Self {
        let params = Arc::new(params);
        let tasks = pool
            .rubrics()
            .iter()
            .map(|rubric| {
                ReviewerTask::new(Arc::clone(rubric), clients.clone(), Arc::clone(&params))
            })
            .collect();
        Self { tasks }
    }

    /// Rubric names in registration order
    pub fn rubric_names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.rubric().name.as_str()).collect()
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, chunk: Chunk) -> ChunkReport {
        self.execute_with_progress(chunk, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Always produces a report with one entry per rubric. Reviewers run as
    /// independent tasks; one reviewer failing, stalling or panicking does
    /// not affect the others.
    pub async fn execute_with_progress(
        &self,
        chunk: Chunk,
        progress: &dyn ReviewProgressNotifier,
    ) -> ChunkReport {
        let chunk = Arc::new(chunk);
        info!(
            "Reviewing chunk {} with {} reviewers",
            chunk.id,
            self.tasks.len()
        );
        progress.on_chunk_start(&chunk, self.tasks.len());

        let mut join_set = JoinSet::new();
        for (slot, task) in self.tasks.iter().enumerate() {
            let task = task.clone();
            let chunk = Arc::clone(&chunk);

            join_set.spawn(async move {
                let outcome = task.run(&chunk).await;
                (slot, outcome)
            });
        }

        let mut slots: Vec<Option<ReviewerOutcome>> = vec![None; self.tasks.len()];

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((slot, outcome)) => {
                    progress.on_reviewer_complete(&outcome);
                    slots[slot] = Some(outcome);
                }
                Err(e) => {
                    warn!("Reviewer task join error: {}", e);
                }
            }
        }

        let outcomes: Vec<ReviewerOutcome> = slots
            .into_iter()
            .zip(&self.tasks)
            .map(|(slot, task)| {
                slot.unwrap_or_else(|| {
                    let outcome = ReviewerOutcome::task_failed(
                        task.rubric().name.clone(),
                        "reviewer task panicked or was aborted",
                    );
                    progress.on_reviewer_complete(&outcome);
                    outcome
                })
            })
            .collect();

        let report = ChunkReport::aggregate(&chunk, &self.rubric_names(), outcomes);
        info!(
            "Chunk {} reviewed: {} ({} flagged, {} for human review)",
            report.chunk_id,
            report.overall_status,
            report.flagged().count(),
            report.human_review_count()
        );
        progress.on_chunk_complete(&report);
        report
    }
}
