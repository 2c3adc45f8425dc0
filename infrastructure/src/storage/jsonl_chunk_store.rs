//! JSONL chunk store.
//!
//! Chunks are read from a JSONL file, one object per line:
//!
//! ```json
//! {"chunk_id": "..", "doc_id": "..", "chunk_index": 0, "text": "..",
//!  "doc_name": "..", "page": 12, "paragraph": 3, "predicted_label": "..",
//!  "analysis_status": "Complete"}
//! ```
//!
//! The chunk file itself is never rewritten. Processed chunks are appended
//! to a `<file>.status.jsonl` sidecar so that reruns resume where the last
//! run stopped.

use async_trait::async_trait;
use panel_application::ports::chunk_source::{ChunkSource, ChunkSourceError};
use panel_domain::{Chunk, ChunkLocator, ReviewStatus};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};

const STATUS_SUFFIX: &str = ".status.jsonl";

/// Accepts `"12"`, `12` or `null`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ChunkRecord {
    chunk_id: String,
    doc_id: String,
    chunk_index: u32,
    text: String,
    #[serde(default)]
    doc_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    page: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    paragraph: Option<String>,
    #[serde(default)]
    predicted_label: Option<String>,
    #[serde(default)]
    analysis_status: Option<String>,
}

impl ChunkRecord {
    fn is_complete(&self) -> bool {
        self.analysis_status.as_deref() == Some(ReviewStatus::Complete.as_str())
    }

    fn to_chunk(&self) -> Result<Chunk, String> {
        let mut chunk = Chunk::new(
            self.chunk_id.clone(),
            self.doc_id.clone(),
            self.chunk_index,
            self.text.clone(),
        )
        .map_err(|e| e.to_string())?;

        if let Some(title) = &self.doc_name {
            chunk = chunk.with_title(title.clone());
        }
        if self.page.is_some() || self.paragraph.is_some() {
            chunk = chunk.with_locator(ChunkLocator {
                page: self.page.clone(),
                paragraph: self.paragraph.clone(),
            });
        }
        if let Some(label) = self.predicted_label.as_deref().filter(|l| !l.trim().is_empty()) {
            chunk = chunk.with_predicted_label(label);
        }
        Ok(chunk)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StatusRecord {
    chunk_id: String,
    status: ReviewStatus,
    timestamp: String,
}

/// Chunk source over a JSONL file
pub struct JsonlChunkStore {
    path: PathBuf,
    status_path: PathBuf,
    chunks: Vec<Chunk>,
    initially_complete: Vec<bool>,
    processed: Mutex<HashMap<String, ReviewStatus>>,
}

impl JsonlChunkStore {
    /// Open the store at `path`, replaying its status sidecar if present.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ChunkSourceError> {
        let path = path.as_ref().to_path_buf();
        let status_path = Self::status_path_for(&path);

        let content = std::fs::read_to_string(&path)?;
        let mut chunks = Vec::new();
        let mut initially_complete = Vec::new();

        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let invalid = |message: String| ChunkSourceError::InvalidRecord {
                line: index + 1,
                message,
            };
            let record: ChunkRecord =
                serde_json::from_str(line).map_err(|e| invalid(e.to_string()))?;
            chunks.push(record.to_chunk().map_err(invalid)?);
            initially_complete.push(record.is_complete());
        }

        let processed = Self::replay_statuses(&status_path)?;
        info!(
            "Opened chunk store {} ({} chunks, {} previously processed)",
            path.display(),
            chunks.len(),
            processed.len()
        );

        Ok(Self {
            path,
            status_path,
            chunks,
            initially_complete,
            processed: Mutex::new(processed),
        })
    }

    /// Sidecar path: the chunk file name with `.status.jsonl` appended.
    pub fn status_path_for(path: &Path) -> PathBuf {
        let mut name = OsString::from(path.as_os_str());
        name.push(STATUS_SUFFIX);
        PathBuf::from(name)
    }

    fn replay_statuses(
        status_path: &Path,
    ) -> Result<HashMap<String, ReviewStatus>, ChunkSourceError> {
        let mut processed = HashMap::new();
        if !status_path.exists() {
            return Ok(processed);
        }

        let content = std::fs::read_to_string(status_path)?;
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<StatusRecord>(line) {
                Ok(record) => {
                    processed.insert(record.chunk_id, record.status);
                }
                // a torn final line from an interrupted run
                Err(e) => warn!(
                    "Ignoring status line {} of {}: {}",
                    index + 1,
                    status_path.display(),
                    e
                ),
            }
        }
        Ok(processed)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn status_path(&self) -> &Path {
        &self.status_path
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Status recorded for `chunk_id` by this or an earlier run
    pub fn status(&self, chunk_id: &str) -> Option<ReviewStatus> {
        self.processed
            .lock()
            .ok()
            .and_then(|p| p.get(chunk_id).copied())
    }

    /// Unreviewed chunks ordered by document, then by position in the document
    fn pending(&self) -> Vec<Chunk> {
        let Ok(processed) = self.processed.lock() else {
            return Vec::new();
        };
        let mut pending: Vec<Chunk> = self
            .chunks
            .iter()
            .zip(&self.initially_complete)
            .filter(|(chunk, complete)| !**complete && !processed.contains_key(&chunk.id))
            .map(|(chunk, _)| chunk.clone())
            .collect();
        pending.sort_by(|a, b| {
            a.document_id
                .cmp(&b.document_id)
                .then(a.index.cmp(&b.index))
        });
        pending
    }
}

#[async_trait]
impl ChunkSource for JsonlChunkStore {
    async fn pending_chunks(&self) -> Result<Vec<Chunk>, ChunkSourceError> {
        Ok(self.pending())
    }

    async fn next_pending(&self) -> Result<Option<Chunk>, ChunkSourceError> {
        Ok(self.pending().into_iter().next())
    }

    async fn mark_processed(
        &self,
        chunk_id: &str,
        status: ReviewStatus,
    ) -> Result<(), ChunkSourceError> {
        if !self.chunks.iter().any(|c| c.id == chunk_id) {
            return Err(ChunkSourceError::UnknownChunk(chunk_id.to_string()));
        }

        let record = StatusRecord {
            chunk_id: chunk_id.to_string(),
            status,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        };
        let line = serde_json::to_string(&record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let mut processed = self
            .processed
            .lock()
            .map_err(|_| std::io::Error::other("status map lock poisoned"))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.status_path)?;
        writeln!(file, "{}", line)?;
        file.flush()?;

        processed.insert(chunk_id.to_string(), status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHUNKS: &str = r#"{"chunk_id": "a", "doc_id": "d1", "chunk_index": 0, "text": "First chunk", "doc_name": "Book", "page": 4, "paragraph": "2"}
{"chunk_id": "b", "doc_id": "d1", "chunk_index": 1, "text": "Second chunk", "analysis_status": "Complete"}

{"chunk_id": "c", "doc_id": "d1", "chunk_index": 2, "text": "Third chunk", "predicted_label": "institutions", "analysis_status": "Pending"}
"#;

    fn store_file(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunks.jsonl");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn test_pending_skips_complete() {
        let (_dir, path) = store_file(CHUNKS);
        let store = JsonlChunkStore::open(&path).unwrap();
        assert_eq!(store.len(), 3);

        let pending = store.pending_chunks().await.unwrap();
        let ids: Vec<&str> = pending.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        let first = &pending[0];
        assert_eq!(first.title.as_deref(), Some("Book"));
        assert_eq!(first.page(), Some("4"));
        assert_eq!(first.paragraph(), Some("2"));
        assert_eq!(pending[1].predicted_label(), Some("institutions"));
    }

    #[tokio::test]
    async fn test_pending_ordered_by_document_and_index() {
        let content = [
            r#"{"chunk_id": "b-1", "doc_id": "book-b", "chunk_index": 1, "text": "t"}"#,
            r#"{"chunk_id": "a-2", "doc_id": "book-a", "chunk_index": 2, "text": "t"}"#,
            r#"{"chunk_id": "b-0", "doc_id": "book-b", "chunk_index": 0, "text": "t"}"#,
            r#"{"chunk_id": "a-10", "doc_id": "book-a", "chunk_index": 10, "text": "t"}"#,
            r#"{"chunk_id": "a-0", "doc_id": "book-a", "chunk_index": 0, "text": "t"}"#,
        ]
        .join("\n");
        let (_dir, path) = store_file(&content);
        let store = JsonlChunkStore::open(&path).unwrap();

        let pending = store.pending_chunks().await.unwrap();
        let ids: Vec<&str> = pending.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a-0", "a-2", "a-10", "b-0", "b-1"]);

        let next = store.next_pending().await.unwrap().unwrap();
        assert_eq!(next.id, "a-0");
        store
            .mark_processed("a-0", ReviewStatus::Complete)
            .await
            .unwrap();
        let next = store.next_pending().await.unwrap().unwrap();
        assert_eq!(next.id, "a-2");
    }

    #[tokio::test]
    async fn test_mark_processed_and_resume() {
        let (_dir, path) = store_file(CHUNKS);
        {
            let store = JsonlChunkStore::open(&path).unwrap();
            store.mark_processed("a", ReviewStatus::Pending).await.unwrap();
            assert_eq!(store.next_pending().await.unwrap().unwrap().id, "c");
            assert_eq!(store.status("a"), Some(ReviewStatus::Pending));
        }

        // a second run replays the sidecar
        let reopened = JsonlChunkStore::open(&path).unwrap();
        let ids: Vec<String> = reopened
            .pending_chunks()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["c".to_string()]);
        assert!(JsonlChunkStore::status_path_for(&path).exists());
    }

    #[tokio::test]
    async fn test_mark_unknown_chunk() {
        let (_dir, path) = store_file(CHUNKS);
        let store = JsonlChunkStore::open(&path).unwrap();
        let err = store
            .mark_processed("zzz", ReviewStatus::Complete)
            .await
            .unwrap_err();
        assert!(matches!(err, ChunkSourceError::UnknownChunk(_)));
    }

    #[test]
    fn test_invalid_line_reports_line_number() {
        let (_dir, path) = store_file(
            "{\"chunk_id\": \"a\", \"doc_id\": \"d\", \"chunk_index\": 0, \"text\": \"t\"}\nnot json\n",
        );
        match JsonlChunkStore::open(&path) {
            Err(ChunkSourceError::InvalidRecord { line, .. }) => assert_eq!(line, 2),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn test_blank_chunk_id_rejected() {
        let (_dir, path) =
            store_file(r#"{"chunk_id": " ", "doc_id": "d", "chunk_index": 0, "text": "t"}"#);
        assert!(matches!(
            JsonlChunkStore::open(&path),
            Err(ChunkSourceError::InvalidRecord { line: 1, .. })
        ));
    }

    #[test]
    fn test_torn_status_line_ignored() {
        let (_dir, path) = store_file(CHUNKS);
        let status_path = JsonlChunkStore::status_path_for(&path);
        std::fs::write(
            &status_path,
            "{\"chunk_id\": \"c\", \"status\": \"Complete\", \"timestamp\": \"t\"}\n{\"chunk_id\": \"a\", \"sta",
        )
        .unwrap();

        let store = JsonlChunkStore::open(&path).unwrap();
        assert_eq!(store.status("c"), Some(ReviewStatus::Complete));
        assert_eq!(store.status("a"), None);
    }

    #[test]
    fn test_status_path() {
        assert_eq!(
            JsonlChunkStore::status_path_for(Path::new("/data/chunks.jsonl")),
            PathBuf::from("/data/chunks.jsonl.status.jsonl")
        );
    }
}
