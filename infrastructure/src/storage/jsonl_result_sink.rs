//! JSONL result sink.
//!
//! Each [`ChunkReport`] is written as a single JSON line with a `timestamp`,
//! the chunk metadata and an ordered `reviews` array holding one object per
//! rubric. Lines are appended, so reruns extend the same file.

use async_trait::async_trait;
use panel_application::ports::result_sink::{ResultSink, ResultSinkError};
use panel_domain::{ChunkReport, ReviewStatus, ReviewerOutcome};
use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-only JSONL writer for chunk reports.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record.
pub struct JsonlResultSink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlResultSink {
    /// Open `path` for appending, creating it and its parent directories.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ResultSinkError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn review_record(outcome: &ReviewerOutcome) -> Value {
    let verdict = outcome.verdict();
    let assessment = verdict.assessment();
    let problematic_text = match verdict.error_reason() {
        Some(reason) => Some(format!("ERROR: {}", reason)),
        None => verdict.excerpt().map(str::to_string),
    };

    json!({
        "rubric": outcome.rubric(),
        "issue_found": verdict.issues_found(),
        "problematic_text": problematic_text,
        "observation": assessment.and_then(|a| a.observation.as_deref()),
        "recommendation": assessment
            .and_then(|a| a.recommendation.as_ref())
            .map(|r| r.as_str()),
        "confidence": outcome.confidence(),
        "human_review": outcome.human_review(),
        "retries": outcome.retries(),
        "status": outcome.status().as_str(),
        "escalation": outcome.escalation().map(|e| e.as_str()),
    })
}

fn report_record(report: &ChunkReport, status: ReviewStatus) -> Value {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let reviews: Vec<Value> = report.entries.iter().map(review_record).collect();

    json!({
        "timestamp": timestamp,
        "doc_id": report.document_id,
        "doc_name": report.title,
        "chunk_id": report.chunk_id,
        "chunk_index": report.chunk_index,
        "text": report.text,
        "predicted_label": report.predicted_label,
        "predicted_label_confidence": report.label_score,
        "overall_status": status.as_str(),
        "narrative": report.narrative(),
        "reviews": reviews,
    })
}

#[async_trait]
impl ResultSink for JsonlResultSink {
    async fn save(
        &self,
        report: &ChunkReport,
        status: ReviewStatus,
    ) -> Result<(), ResultSinkError> {
        let line = serde_json::to_string(&report_record(report, status))
            .map_err(|e| ResultSinkError::Serialization(e.to_string()))?;

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| std::io::Error::other("result writer lock poisoned"))?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_domain::{Assessment, Chunk, EscalationReason, Recommendation, Verdict};

    fn sample_report() -> ChunkReport {
        let chunk = Chunk::new("c-1", "doc-1", 2, "The sky is green.")
            .unwrap()
            .with_title("Field Guide")
            .with_predicted_label("nature");
        let outcomes = vec![
            ReviewerOutcome::accepted(
                "FactCheck",
                Verdict::from(Assessment::issue(
                    "The sky is green.",
                    "The sky is blue.",
                    Recommendation::FactCheck,
                )),
                92,
                1,
            ),
            ReviewerOutcome::escalated(
                "Tone",
                Verdict::error("invalid JSON"),
                0,
                1,
                EscalationReason::MalformedOutput,
            ),
        ];
        ChunkReport::aggregate(&chunk, &["FactCheck", "Tone"], outcomes).with_label_score(0.81)
    }

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_save_writes_one_line_per_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("results.jsonl");
        let sink = JsonlResultSink::new(&path).unwrap();

        let report = sample_report();
        sink.save(&report, report.overall_status).await.unwrap();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        let record = &lines[0];
        assert_eq!(record["doc_id"], "doc-1");
        assert_eq!(record["doc_name"], "Field Guide");
        assert_eq!(record["chunk_index"], 2);
        assert_eq!(record["predicted_label"], "nature");
        assert_eq!(record["predicted_label_confidence"], 0.81);
        assert_eq!(record["overall_status"], "Pending");
        assert!(record["timestamp"].is_string());

        let reviews = record["reviews"].as_array().unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0]["rubric"], "FactCheck");
        assert_eq!(reviews[0]["issue_found"], true);
        assert_eq!(reviews[0]["recommendation"], "fact-check");
        assert_eq!(reviews[0]["confidence"], 92);
        assert_eq!(reviews[0]["status"], "Complete");
        assert!(reviews[0]["escalation"].is_null());

        assert_eq!(reviews[1]["rubric"], "Tone");
        assert_eq!(reviews[1]["problematic_text"], "ERROR: invalid JSON");
        assert_eq!(reviews[1]["human_review"], true);
        assert_eq!(reviews[1]["escalation"], "malformed_output");
    }

    #[tokio::test]
    async fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.jsonl");
        let report = sample_report();

        JsonlResultSink::new(&path)
            .unwrap()
            .save(&report, ReviewStatus::Pending)
            .await
            .unwrap();
        JsonlResultSink::new(&path)
            .unwrap()
            .save(&report, ReviewStatus::Complete)
            .await
            .unwrap();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["overall_status"], "Complete");
    }
}
