//! Console output formatter for chunk reports

use colored::Colorize;
use panel_application::ProcessSummary;
use panel_domain::{ChunkReport, ReviewStatus, ReviewerOutcome};

/// Formats chunk reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one report with a line per rubric
    pub fn format_report(report: &ChunkReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::report_header(report));

        if let Some(label) = &report.predicted_label {
            let score = report
                .label_score
                .map(|s| format!(" ({:.3})", s))
                .unwrap_or_default();
            output.push_str(&format!("{} {}{}\n", "Label:".dimmed(), label, score));
        }

        for entry in &report.entries {
            output.push_str(&Self::format_entry(entry));
        }

        output
    }

    /// Format the stored narrative under the report header
    pub fn format_narrative(report: &ChunkReport) -> String {
        format!(
            "{}\n{}\n",
            Self::report_header(report),
            Self::indent(report.narrative(), "  ")
        )
    }

    /// Format as single-line JSON
    pub fn format_json(report: &ChunkReport) -> String {
        serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the totals of a run
    pub fn format_summary(summary: &ProcessSummary) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", "=".repeat(60).cyan()));
        output.push_str(&format!(
            "{} {} processed, {} complete, {} pending",
            "Done:".cyan().bold(),
            summary.processed,
            summary.complete.to_string().green(),
            summary.pending.to_string().yellow()
        ));
        if summary.failed > 0 {
            output.push_str(&format!(
                ", {} not saved",
                summary.failed.to_string().red()
            ));
        }
        output.push('\n');

        for (document, tally) in &summary.documents {
            let marker = if tally.pending() == 0 {
                "✓".green()
            } else {
                "…".yellow()
            };
            output.push_str(&format!(
                "  {} {}: {}/{} complete\n",
                marker, document, tally.complete, tally.processed
            ));
        }

        if summary.cancelled {
            output.push_str(&format!(
                "{}\n",
                "Cancelled; remaining chunks stay pending.".yellow()
            ));
        } else if summary.processed == 0 {
            output.push_str(&format!("{}\n", "No pending chunks.".dimmed()));
        }

        output
    }

    fn report_header(report: &ChunkReport) -> String {
        let title = report.title.as_deref().unwrap_or(&report.document_id);
        format!(
            "{} {} {} #{} {}\n",
            "──".cyan(),
            report.chunk_id.bold(),
            title.dimmed(),
            report.chunk_index,
            Self::status_badge(report.overall_status)
        )
    }

    fn format_entry(entry: &ReviewerOutcome) -> String {
        let verdict = entry.verdict();
        let marker = if entry.human_review() {
            "?".yellow().bold()
        } else if verdict.issues_found() {
            "!".red().bold()
        } else {
            "v".green().bold()
        };

        let mut line = format!(
            "  {} {:<20} confidence {:>3}  retries {}",
            marker,
            entry.rubric(),
            entry.confidence(),
            entry.retries()
        );
        if let Some(reason) = entry.escalation() {
            line.push_str(&format!("  {}", format!("human review: {}", reason).yellow()));
        }
        line.push('\n');

        if let Some(reason) = verdict.error_reason() {
            line.push_str(&format!("      {} {}\n", "error:".red(), reason));
        } else if let Some(assessment) = verdict.assessment().filter(|a| a.issues_found) {
            if let Some(text) = &assessment.problematic_text {
                line.push_str(&format!("      \"{}\"\n", text.italic()));
            }
            if let Some(observation) = &assessment.observation {
                line.push_str(&format!("      {}\n", observation));
            }
            if let Some(recommendation) = &assessment.recommendation {
                line.push_str(&format!("      {} {}\n", "->".cyan(), recommendation));
            }
        }

        line
    }

    fn status_badge(status: ReviewStatus) -> String {
        match status {
            ReviewStatus::Complete => format!("[{}]", status.as_str().green()),
            ReviewStatus::Pending => format!("[{}]", status.as_str().yellow()),
        }
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
