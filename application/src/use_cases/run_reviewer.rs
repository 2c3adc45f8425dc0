//! Run Reviewer use case
//!
//! Drives one rubric's review of one chunk through the reviewer state
//! machine until it reaches `Done` or `HumanReview`.

use crate::config::ReviewParams;
use crate::ports::generation::GenerationClient;
use crate::ports::knowledge_base::{KnowledgeBase, KnowledgeBaseError};
use panel_domain::review::{next, route};
use panel_domain::{
    AttemptContext, Chunk, EscalationReason, ReferenceMaterial, ReviewPromptTemplate, ReviewState,
    ReviewerOutcome, RouteDecision, RubricConfig, Verdict, parse_confidence, parse_verdict,
    rank_items,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// External collaborators shared by every reviewer of a run
#[derive(Clone)]
pub struct ReviewerClients {
    /// Produces verdicts
    pub generator: Arc<dyn GenerationClient>,
    /// Grades verdicts
    pub evaluator: Arc<dyn GenerationClient>,
    pub knowledge_base: Arc<dyn KnowledgeBase>,
}

impl ReviewerClients {
    pub fn new(
        generator: Arc<dyn GenerationClient>,
        evaluator: Arc<dyn GenerationClient>,
        knowledge_base: Arc<dyn KnowledgeBase>,
    ) -> Self {
        Self {
            generator,
            evaluator,
            knowledge_base,
        }
    }
}

/// In-progress state of one reviewer task, owned by that task alone.
struct Attempt {
    verdict: Verdict,
    confidence: u8,
    retries: u32,
    prompt: String,
    raw: String,
}

impl Attempt {
    fn new() -> Self {
        Self {
            verdict: Verdict::error("no generation attempt completed"),
            confidence: 0,
            retries: 0,
            prompt: String::new(),
            raw: String::new(),
        }
    }
}

/// One rubric's reviewer
#[derive(Clone)]
pub struct ReviewerTask {
    rubric: Arc<RubricConfig>,
    clients: ReviewerClients,
    params: Arc<ReviewParams>,
}

impl ReviewerTask {
    pub fn new(
        rubric: Arc<RubricConfig>,
        clients: ReviewerClients,
        params: Arc<ReviewParams>,
    ) -> Self {
        Self {
            rubric,
            clients,
            params,
        }
    }

    pub fn rubric(&self) -> &RubricConfig {
        &self.rubric
    }

    /// Review `chunk` and return the terminal outcome.
    ///
    /// Never fails: collaborator errors and the optional task deadline all
    /// end in an escalated outcome.
    pub async fn run(&self, chunk: &Chunk) -> ReviewerOutcome {
        let mut attempt = Attempt::new();

        let Some(limit) = self.params.reviewer_timeout else {
            return self.drive(chunk, &mut attempt).await;
        };

        let result = tokio::time::timeout(limit, self.drive(chunk, &mut attempt)).await;
        match result {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(
                    rubric = %self.rubric.name,
                    chunk = %chunk.id,
                    attempt = attempt.retries,
                    "Reviewer timed out after {:?}, escalating",
                    limit
                );
                ReviewerOutcome::escalated(
                    self.rubric.name.clone(),
                    attempt.verdict,
                    attempt.confidence,
                    attempt.retries,
                    EscalationReason::TimedOut,
                )
            }
        }
    }

    async fn drive(&self, chunk: &Chunk, attempt: &mut Attempt) -> ReviewerOutcome {
        let rubric = &self.rubric;
        let mut state = ReviewState::Generate;
        let mut escalation = None;

        loop {
            match state {
                ReviewState::Generate => self.generate(chunk, attempt).await,
                ReviewState::SelfEvaluate => self.self_evaluate(attempt).await,
                ReviewState::Route => {}
                ReviewState::Done => {
                    info!(
                        rubric = %rubric.name,
                        chunk = %chunk.id,
                        "Accepted verdict (confidence {}, attempt {})",
                        attempt.confidence,
                        attempt.retries
                    );
                    return ReviewerOutcome::accepted(
                        rubric.name.clone(),
                        attempt.verdict.clone(),
                        attempt.confidence,
                        attempt.retries,
                    );
                }
                ReviewState::HumanReview => {
                    let reason = escalation.unwrap_or(EscalationReason::MalformedOutput);
                    warn!(
                        rubric = %rubric.name,
                        chunk = %chunk.id,
                        "Escalating to human review: {} (confidence {}, attempt {})",
                        reason,
                        attempt.confidence,
                        attempt.retries
                    );
                    return ReviewerOutcome::escalated(
                        rubric.name.clone(),
                        attempt.verdict.clone(),
                        attempt.confidence,
                        attempt.retries,
                        reason,
                    );
                }
            }

            let ctx = AttemptContext::new(
                &attempt.verdict,
                attempt.confidence,
                attempt.retries,
                rubric.confidence_threshold,
            )
            .with_max_retries(self.params.max_retries);

            if state == ReviewState::Route
                && let RouteDecision::Escalate(reason) = route(&ctx)
            {
                escalation = Some(reason);
            }

            let next_state = next(state, &ctx);
            debug!(
                rubric = %rubric.name,
                attempt = attempt.retries,
                "{} -> {}",
                state,
                next_state
            );
            state = next_state;
        }
    }

    async fn generate(&self, chunk: &Chunk, attempt: &mut Attempt) {
        attempt.retries += 1;
        debug!(
            rubric = %self.rubric.name,
            attempt = attempt.retries,
            model = self.clients.generator.model(),
            "Generating verdict"
        );

        let reference = match self.resolve_reference(chunk).await {
            Ok(reference) => reference,
            Err(e) => {
                warn!(rubric = %self.rubric.name, "Knowledge base lookup failed: {}", e);
                attempt.raw.clear();
                attempt.verdict = Verdict::error(format!("knowledge base lookup failed: {}", e));
                attempt.confidence = 0;
                return;
            }
        };

        let prompt = ReviewPromptTemplate::review_prompt(chunk, &self.rubric, &reference);
        let verdict = match self.clients.generator.generate(&prompt).await {
            Ok(raw) => {
                let verdict = parse_verdict(&raw);
                if let Some(reason) = verdict.error_reason() {
                    warn!(rubric = %self.rubric.name, "Unusable generation output: {}", reason);
                }
                attempt.raw = raw;
                verdict
            }
            Err(e) => {
                warn!(rubric = %self.rubric.name, "Generation failed: {}", e);
                attempt.raw.clear();
                Verdict::error(format!("generation failed: {}", e))
            }
        };

        attempt.prompt = prompt;
        attempt.verdict = verdict;
        attempt.confidence = 0;
    }

    async fn self_evaluate(&self, attempt: &mut Attempt) {
        let prompt = ReviewPromptTemplate::evaluation_prompt(&attempt.prompt, &attempt.raw);

        attempt.confidence = match self.clients.evaluator.generate(&prompt).await {
            Ok(raw) => {
                let confidence = parse_confidence(&raw);
                debug!(
                    rubric = %self.rubric.name,
                    attempt = attempt.retries,
                    "Self-evaluated confidence {}",
                    confidence
                );
                confidence
            }
            Err(e) => {
                warn!(
                    rubric = %self.rubric.name,
                    "Evaluation failed, confidence set to 0: {}",
                    e
                );
                0
            }
        };
    }

    /// Pick the reference material for this attempt.
    ///
    /// Always-consult rubrics look up every chunk. Others skip chunks
    /// carrying the unrelated label. An empty lookup falls back to the
    /// rubric's own reference items.
    async fn resolve_reference(
        &self,
        chunk: &Chunk,
    ) -> Result<ReferenceMaterial, KnowledgeBaseError> {
        if !self.rubric.always_consult
            && let Some(label) = chunk.predicted_label()
            && label == self.params.unrelated_label
        {
            debug!(rubric = %self.rubric.name, "Skipping lookup for '{}' chunk", label);
            return Ok(ReferenceMaterial::NotApplicable(label.to_string()));
        }

        let items = self.clients.knowledge_base.lookup(&chunk.text).await?;
        if let Some(item) = items.into_iter().next() {
            return Ok(ReferenceMaterial::Found(item));
        }

        Ok(rank_items(&chunk.text, &self.rubric.reference)
            .first()
            .map(|item| ReferenceMaterial::Found((*item).clone()))
            .unwrap_or(ReferenceMaterial::NotFound))
    }
}
