//! Per-chunk aggregation of reviewer outcomes.

use super::outcome::{ReviewStatus, ReviewerOutcome};
use super::verdict::Verdict;
use crate::chunk::Chunk;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Consolidated review of one chunk across every rubric of the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkReport {
    pub chunk_id: String,
    pub document_id: String,
    pub chunk_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_score: Option<f64>,
    /// One entry per rubric, in registration order
    pub entries: Vec<ReviewerOutcome>,
    pub overall_status: ReviewStatus,
    pub narrative: String,
}

impl ChunkReport {
    /// Combine reviewer outcomes for `chunk` into a report.
    ///
    /// Emits exactly one entry per name in `rubric_names`, in that order.
    /// A rubric with no outcome gets a [`ReviewerOutcome::task_failed`]
    /// placeholder. Outcomes for unknown rubrics are dropped and only the
    /// first outcome per rubric is kept.
    pub fn aggregate<S: AsRef<str>>(
        chunk: &Chunk,
        rubric_names: &[S],
        outcomes: Vec<ReviewerOutcome>,
    ) -> Self {
        let mut by_rubric: HashMap<String, ReviewerOutcome> = HashMap::new();
        for outcome in outcomes {
            let name = outcome.rubric().to_string();
            if !rubric_names.iter().any(|n| n.as_ref() == name) {
                warn!(chunk = %chunk.id, rubric = %name, "Dropping outcome for unknown rubric");
                continue;
            }
            if by_rubric.contains_key(&name) {
                warn!(chunk = %chunk.id, rubric = %name, "Dropping duplicate outcome");
                continue;
            }
            by_rubric.insert(name, outcome);
        }

        let entries: Vec<ReviewerOutcome> = rubric_names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                by_rubric.remove(name).unwrap_or_else(|| {
                    warn!(chunk = %chunk.id, rubric = %name, "No outcome for rubric");
                    ReviewerOutcome::task_failed(name, "reviewer produced no outcome")
                })
            })
            .collect();

        let overall_status = if entries.iter().all(|e| e.status().is_complete()) {
            ReviewStatus::Complete
        } else {
            ReviewStatus::Pending
        };
        let narrative = render_narrative(&entries);

        Self {
            chunk_id: chunk.id.clone(),
            document_id: chunk.document_id.clone(),
            chunk_index: chunk.index,
            title: chunk.title.clone(),
            text: chunk.text.clone(),
            predicted_label: chunk.predicted_label.clone(),
            label_score: None,
            entries,
            overall_status,
            narrative,
        }
    }

    pub fn with_label_score(mut self, score: f64) -> Self {
        self.label_score = Some(score);
        self
    }

    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    pub fn entry(&self, rubric: &str) -> Option<&ReviewerOutcome> {
        self.entries.iter().find(|e| e.rubric() == rubric)
    }

    pub fn human_review_count(&self) -> usize {
        self.entries.iter().filter(|e| e.human_review()).count()
    }

    /// Entries whose reviewer reported an issue.
    pub fn flagged(&self) -> impl Iterator<Item = &ReviewerOutcome> {
        self.entries.iter().filter(|e| e.verdict().issues_found())
    }

    pub fn is_complete(&self) -> bool {
        self.overall_status.is_complete()
    }
}

fn excerpt_line(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Error(e) => format!("ERROR: {}", e.reason),
        Verdict::Assessment(a) => a
            .problematic_text
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
    }
}

fn render_narrative(entries: &[ReviewerOutcome]) -> String {
    let mut out = String::new();
    for entry in entries {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("{}:\n", entry.rubric()));
        out.push_str(&format!(
            "  Problematic text: {}\n",
            excerpt_line(entry.verdict())
        ));
        if let Some(a) = entry.verdict().assessment() {
            if let Some(observation) = &a.observation {
                out.push_str(&format!("  Observation: {}\n", observation));
            }
            if let Some(recommendation) = &a.recommendation {
                out.push_str(&format!("  Recommendation: {}\n", recommendation));
            }
        }
        out.push_str(&format!("  Confidence: {}\n", entry.confidence()));
        out.push_str(&format!("  Retries: {}\n", entry.retries()));
        let review = match entry.escalation() {
            Some(reason) => format!("yes ({})", reason),
            None => "no".to_string(),
        };
        out.push_str(&format!("  Human review: {}\n", review));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::state::EscalationReason;
    use crate::review::verdict::{Assessment, Recommendation};

    fn chunk() -> Chunk {
        Chunk::new("c-1", "doc-9", 4, "Some chunk text.")
            .unwrap()
            .with_title("Annual Report")
    }

    fn complete(rubric: &str) -> ReviewerOutcome {
        ReviewerOutcome::accepted(rubric, Verdict::from(Assessment::no_issue()), 90, 1)
    }

    fn flagged(rubric: &str) -> ReviewerOutcome {
        ReviewerOutcome::accepted(
            rubric,
            Verdict::from(Assessment::issue(
                "Some chunk",
                "unsupported claim",
                Recommendation::FactCheck,
            )),
            80,
            2,
        )
    }

    #[test]
    fn test_registration_order() {
        let names = ["A", "B", "C"];
        // outcomes arrive in completion order
        let outcomes = vec![complete("C"), flagged("A"), complete("B")];
        let report = ChunkReport::aggregate(&chunk(), &names, outcomes);

        let order: Vec<&str> = report.entries.iter().map(|e| e.rubric()).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
        assert_eq!(report.overall_status, ReviewStatus::Complete);
        assert_eq!(report.flagged().count(), 1);
        assert_eq!(report.title.as_deref(), Some("Annual Report"));
    }

    #[test]
    fn test_missing_rubric_gets_placeholder() {
        let names = ["A", "B"];
        let report = ChunkReport::aggregate(&chunk(), &names, vec![complete("A")]);

        assert_eq!(report.entries.len(), 2);
        let b = report.entry("B").unwrap();
        assert_eq!(b.escalation(), Some(EscalationReason::TaskFailed));
        assert_eq!(report.overall_status, ReviewStatus::Pending);
        assert_eq!(report.human_review_count(), 1);
    }

    #[test]
    fn test_unknown_and_duplicate_outcomes_dropped() {
        let names = ["A"];
        let outcomes = vec![flagged("A"), complete("A"), complete("Z")];
        let report = ChunkReport::aggregate(&chunk(), &names, outcomes);

        assert_eq!(report.entries.len(), 1);
        // first outcome wins
        assert!(report.entry("A").unwrap().verdict().issues_found());
        assert!(report.entry("Z").is_none());
    }

    #[test]
    fn test_any_human_review_makes_chunk_pending() {
        let names = ["A", "B"];
        let escalated = ReviewerOutcome::escalated(
            "B",
            Verdict::error("garbled"),
            0,
            1,
            EscalationReason::MalformedOutput,
        );
        let report = ChunkReport::aggregate(&chunk(), &names, vec![complete("A"), escalated]);
        assert_eq!(report.overall_status, ReviewStatus::Pending);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_narrative() {
        let names = ["A", "B", "C"];
        let escalated = ReviewerOutcome::escalated(
            "C",
            Verdict::error("no JSON object in generation output"),
            0,
            1,
            EscalationReason::MalformedOutput,
        );
        let report = ChunkReport::aggregate(
            &chunk(),
            &names,
            vec![flagged("A"), complete("B"), escalated],
        );
        let narrative = report.narrative();

        assert!(narrative.contains("A:\n  Problematic text: Some chunk\n"));
        assert!(narrative.contains("  Recommendation: fact-check\n"));
        assert!(narrative.contains("B:\n  Problematic text: N/A\n"));
        assert!(narrative.contains("  Problematic text: ERROR: no JSON object"));
        assert!(narrative.contains("  Human review: yes (malformed_output)"));
        let a = narrative.find("A:").unwrap();
        let c = narrative.find("C:").unwrap();
        assert!(a < c);
    }

    #[test]
    fn test_empty_pool() {
        let names: [&str; 0] = [];
        let report = ChunkReport::aggregate(&chunk(), &names, vec![]);
        assert!(report.entries.is_empty());
        assert_eq!(report.overall_status, ReviewStatus::Complete);
        assert_eq!(report.narrative(), "");
    }
}
