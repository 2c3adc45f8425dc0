//! Progress reporting for chunk review

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use panel_application::ports::progress::ReviewProgressNotifier;
use panel_domain::{Chunk, ChunkReport, ReviewStatus, ReviewerOutcome};
use std::sync::Mutex;

/// Reports progress with one progress bar per chunk
pub struct ProgressReporter {
    multi: MultiProgress,
    chunk_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            chunk_bar: Mutex::new(None),
        }
    }

    fn chunk_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn outcome_marker(outcome: &ReviewerOutcome) -> String {
        if outcome.human_review() {
            format!("{} {}", "?".yellow(), outcome.rubric())
        } else {
            format!("{} {}", "v".green(), outcome.rubric())
        }
    }

    fn status_message(status: ReviewStatus) -> String {
        match status {
            ReviewStatus::Complete => status.as_str().green().to_string(),
            ReviewStatus::Pending => status.as_str().yellow().to_string(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewProgressNotifier for ProgressReporter {
    fn on_chunk_start(&self, chunk: &Chunk, total_reviewers: usize) {
        let pb = self.multi.add(ProgressBar::new(total_reviewers as u64));
        pb.set_style(Self::chunk_style());
        pb.set_prefix(format!("chunk {}", chunk.id));
        pb.set_message("reviewing...");

        if let Ok(mut bar) = self.chunk_bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_reviewer_complete(&self, outcome: &ReviewerOutcome) {
        if let Ok(bar) = self.chunk_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(Self::outcome_marker(outcome));
            pb.inc(1);
        }
    }

    fn on_chunk_complete(&self, report: &ChunkReport) {
        if let Ok(mut bar) = self.chunk_bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(Self::status_message(report.overall_status));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ReviewProgressNotifier for SimpleProgress {
    fn on_chunk_start(&self, chunk: &Chunk, total_reviewers: usize) {
        println!(
            "{} chunk {} ({} reviewers)",
            "->".cyan(),
            chunk.id.bold(),
            total_reviewers
        );
    }

    fn on_reviewer_complete(&self, outcome: &ReviewerOutcome) {
        match outcome.escalation() {
            Some(reason) => println!("  {} {} ({})", "?".yellow(), outcome.rubric(), reason),
            None => println!("  {} {}", "v".green(), outcome.rubric()),
        }
    }

    fn on_chunk_complete(&self, report: &ChunkReport) {
        println!(
            "  {}",
            ProgressReporter::status_message(report.overall_status)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_domain::{Assessment, Verdict};

    #[test]
    fn test_reporter_tracks_one_chunk() {
        let reporter = ProgressReporter::new();
        let chunk = Chunk::new("c-1", "d", 0, "text").unwrap();
        reporter.on_chunk_start(&chunk, 2);

        let outcome = ReviewerOutcome::accepted("A", Verdict::from(Assessment::no_issue()), 90, 1);
        reporter.on_reviewer_complete(&outcome);
        {
            let bar = reporter.chunk_bar.lock().unwrap();
            assert_eq!(bar.as_ref().unwrap().position(), 1);
        }

        let report = ChunkReport::aggregate(&chunk, &["A"], vec![outcome]);
        reporter.on_chunk_complete(&report);
        assert!(reporter.chunk_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_outcome_marker() {
        let outcome = ReviewerOutcome::task_failed("Tone", "boom");
        assert!(ProgressReporter::outcome_marker(&outcome).contains("Tone"));
    }
}
