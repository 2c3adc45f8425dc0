//! Hand-written port mocks shared by the use case tests.

use crate::ports::generation::{GenerationClient, GenerationError};
use crate::ports::knowledge_base::{KnowledgeBase, KnowledgeBaseError};
use async_trait::async_trait;
use panel_domain::KnowledgeItem;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const FACT_CHECK_ISSUE: &str = r#"{"issues_found": true, "problematic_text": "Dates are disputed", "observation": "unsupported claim", "recommendation": "fact-check"}"#;
pub const NULL_VERDICT: &str = r#"{"issues_found": false, "problematic_text": null, "observation": null, "recommendation": null}"#;

pub fn confidence(score: u8) -> String {
    format!(r#"{{"confidence": {}}}"#, score)
}

/// Replies from a fixed script, then fails once the script runs out.
pub struct ScriptedClient {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
    slow_from: Option<(usize, Duration)>,
}

impl ScriptedClient {
    pub fn new(responses: Vec<&str>) -> Self {
        Self::with_results(responses.into_iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn with_results(results: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            script: Mutex::new(VecDeque::from(results)),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            slow_from: None,
        }
    }

    /// Calls numbered `call` (0-based) and later sleep for `delay` first.
    pub fn slow_from(mut self, call: usize, delay: Duration) -> Self {
        self.slow_from = Some((call, delay));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationClient for ScriptedClient {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some((from, delay)) = self.slow_from
            && call >= from
        {
            tokio::time::sleep(delay).await;
        }
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::RequestFailed("script exhausted".to_string())))
    }
}

/// Picks its reply by the first needle found in the prompt.
///
/// Reviewer tasks of one chunk run concurrently, so shared clients must
/// answer by content rather than call order.
pub struct RoutingClient {
    routes: Vec<(String, Behavior)>,
    fallback: String,
}

pub enum Behavior {
    Reply(String),
    Fail,
    Panic,
    Hang,
}

impl RoutingClient {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            routes: Vec::new(),
            fallback: fallback.into(),
        }
    }

    pub fn route(mut self, needle: impl Into<String>, behavior: Behavior) -> Self {
        self.routes.push((needle.into(), behavior));
        self
    }
}

#[async_trait]
impl GenerationClient for RoutingClient {
    fn model(&self) -> &str {
        "routing"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let behavior = self
            .routes
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, b)| b);

        match behavior {
            None => Ok(self.fallback.clone()),
            Some(Behavior::Reply(text)) => Ok(text.clone()),
            Some(Behavior::Fail) => Err(GenerationError::ConnectionError("refused".to_string())),
            Some(Behavior::Panic) => panic!("generation client panicked"),
            Some(Behavior::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(GenerationError::Timeout)
            }
        }
    }
}

pub struct MockKnowledgeBase {
    items: Vec<KnowledgeItem>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockKnowledgeBase {
    pub fn with_items(items: Vec<KnowledgeItem>) -> Self {
        Self {
            items,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KnowledgeBase for MockKnowledgeBase {
    async fn lookup(&self, _query: &str) -> Result<Vec<KnowledgeItem>, KnowledgeBaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(KnowledgeBaseError::Unavailable("connection reset".to_string()));
        }
        Ok(self.items.clone())
    }
}
