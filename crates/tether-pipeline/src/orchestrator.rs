//! The retry orchestrator.
//!
//! States per request:
//! `RETRIEVE → CLASSIFY → (REFUSE | GENERATE) → VALIDATE(security →
//! integrity → grounding) → (ACCEPT | RETRY | REFUSE)`.
//!
//! Retries re-invoke only generate→validate against the same retrieval
//! context, carrying the prior failure reason; thresholds never relax. The
//! whole pipeline runs under a wall-clock timeout whose expiry abandons any
//! outstanding provider call and returns the timeout-specific refusal.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tether_core::config::TetherConfig;
use tether_core::constants::MAX_ATTEMPTS_CAP;
use tether_core::models::{
    Citation, ConfidenceTier, GenerationAttempt, Query, QueryClass, QueryResult, RefusalKind,
    StageReport,
};
use tether_core::traits::{
    IEmbeddingProvider, IGenerationProvider, ISparseIndex, IValidatorStage, IVectorIndex,
    ValidationContext,
};
use tether_generation::{citations, prompt, GroundedGenerator};
use tether_retrieval::{HybridRetriever, QueryClassifier};
use tether_safety::{GroundingFirewall, IntegrityValidator, MergedWordDetector, SecurityFilter};
use tracing::{debug, info, warn};

use crate::context::RequestContext;
use crate::refusal;

/// The query pipeline. One instance serves many concurrent requests; all
/// per-request state lives in a `RequestContext` owned by the task.
pub struct Pipeline {
    retriever: HybridRetriever,
    classifier: QueryClassifier,
    generator: GroundedGenerator,
    /// Fixed validator sequence: security → integrity → grounding.
    stages: Vec<Box<dyn IValidatorStage>>,
    config: TetherConfig,
}

impl Pipeline {
    pub fn new(
        config: TetherConfig,
        vector: Arc<dyn IVectorIndex>,
        sparse: Arc<dyn ISparseIndex>,
        embedder: Arc<dyn IEmbeddingProvider>,
        provider: Arc<dyn IGenerationProvider>,
    ) -> Self {
        let retriever =
            HybridRetriever::new(vector, sparse, embedder, config.retrieval.clone());
        let classifier = QueryClassifier::new(config.classifier.clone());
        let generator = GroundedGenerator::new(provider, config.generation.clone());
        let stages: Vec<Box<dyn IValidatorStage>> = vec![
            Box::new(SecurityFilter::new()),
            Box::new(IntegrityValidator::with_detector(MergedWordDetector::new(
                config.safety.merged_word_min_len,
            ))),
            Box::new(GroundingFirewall::new()),
        ];

        Self {
            retriever,
            classifier,
            generator,
            stages,
            config,
        }
    }

    /// Answer a query. The only entry point; never returns an error.
    pub async fn query(&self, text: &str, top_k: Option<usize>) -> QueryResult {
        let started = Instant::now();
        let budget = Duration::from_millis(self.config.pipeline.timeout_ms);

        match tokio::time::timeout(budget, self.run(text, top_k, started)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_ms = self.config.pipeline.timeout_ms, "pipeline wall clock expired");
                QueryResult::refusal_result(
                    RefusalKind::Timeout,
                    refusal::TIMEOUT,
                    ConfidenceTier::None,
                    started.elapsed().as_millis() as u64,
                )
            }
        }
    }

    async fn run(&self, text: &str, top_k: Option<usize>, started: Instant) -> QueryResult {
        let mut query = Query::new(text);

        // Smalltalk and unusable queries are decided before any index cost.
        if let Some(class) = self.classifier.precheck(&query) {
            query.class = Some(class);
            return self.short_circuit(class, started);
        }

        let top_k = top_k.unwrap_or(self.config.retrieval.top_k);
        let retrieval = self.retriever.retrieve(&query, top_k).await;

        let class = self.classifier.classify(&query, &retrieval);
        query.class = Some(class);

        if class == QueryClass::OffTopic {
            info!("off-topic query refused");
            return QueryResult::refusal_result(
                RefusalKind::NoRelevantInformation,
                refusal::NO_RELEVANT_INFORMATION,
                retrieval.confidence,
                started.elapsed().as_millis() as u64,
            );
        }

        if retrieval.confidence == ConfidenceTier::None {
            // In-domain wording but nothing retrievable to ground on:
            // generation is skipped entirely.
            info!("confidence none; skipping generation");
            return QueryResult::refusal_result(
                RefusalKind::NoRelevantInformation,
                refusal::NO_RELEVANT_INFORMATION,
                ConfidenceTier::None,
                started.elapsed().as_millis() as u64,
            );
        }

        let ctx = RequestContext::new(query, retrieval, started);
        self.generate_and_validate(&ctx).await
    }

    fn short_circuit(&self, class: QueryClass, started: Instant) -> QueryResult {
        let elapsed = started.elapsed().as_millis() as u64;
        match class {
            QueryClass::Greeting => QueryResult {
                answer: refusal::GREETING_REPLY.to_string(),
                confidence: ConfidenceTier::None,
                is_grounded: false,
                is_refusal: false,
                refusal: None,
                citations: Vec::new(),
                processing_time_ms: elapsed,
            },
            QueryClass::Thanks => QueryResult {
                answer: refusal::THANKS_REPLY.to_string(),
                confidence: ConfidenceTier::None,
                is_grounded: false,
                is_refusal: false,
                refusal: None,
                citations: Vec::new(),
                processing_time_ms: elapsed,
            },
            _ => QueryResult::refusal_result(
                RefusalKind::ClarificationNeeded,
                refusal::CLARIFICATION_NEEDED,
                ConfidenceTier::None,
                elapsed,
            ),
        }
    }

    /// The GENERATE → VALIDATE → (ACCEPT | RETRY | REFUSE) loop.
    ///
    /// The remaining-attempt budget is a loop-local count, not shared
    /// state; the retrieval context is reused verbatim across retries.
    async fn generate_and_validate(&self, ctx: &RequestContext) -> QueryResult {
        let max_attempts = (self.config.pipeline.max_retries + 1).min(MAX_ATTEMPTS_CAP);
        let mut prior_failure: Option<String> = None;

        for attempt_number in 1..=max_attempts {
            let attempt = match self
                .generator
                .generate(&ctx.query, &ctx.retrieval, attempt_number, prior_failure.as_deref())
                .await
            {
                Ok(attempt) => attempt,
                Err(e) if e.is_transient() => {
                    warn!(attempt_number, error = %e, "transient generation failure");
                    if attempt_number == max_attempts {
                        return self.refuse(ctx, RefusalKind::ServiceUnavailable);
                    }
                    let backoff = self.config.pipeline.backoff_ms << (attempt_number - 1);
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                    continue;
                }
                Err(e) => {
                    warn!(error = %e, "non-retryable generation failure");
                    return self.refuse(ctx, RefusalKind::ServiceUnavailable);
                }
            };

            // The model declaring its context insufficient is a content
            // refusal, not a validation failure worth retrying.
            if attempt.raw_text.trim() == prompt::INSUFFICIENT_CONTEXT_REPLY {
                info!("provider declared context insufficient");
                return self.refuse(ctx, RefusalKind::NoRelevantInformation);
            }

            match self.validate(&attempt, ctx) {
                Ok(final_text) => return self.accept(final_text, ctx),
                Err(report) => {
                    debug!(
                        attempt_number,
                        stage = ?report.stage,
                        reason = report.reason.as_deref().unwrap_or(""),
                        "validation failed"
                    );
                    prior_failure = report.reason;
                }
            }
        }

        // Retries exhausted without a groundable answer.
        self.refuse(ctx, RefusalKind::NoRelevantInformation)
    }

    /// Drive the fixed validator sequence, threading rewrites forward.
    fn validate(&self, attempt: &GenerationAttempt, ctx: &RequestContext) -> Result<String, StageReport> {
        let validation_ctx = ValidationContext {
            retrieval: &ctx.retrieval,
            citations: &attempt.candidate_citations,
            config: &self.config.safety,
        };

        let mut text = attempt.raw_text.clone();
        for stage in &self.stages {
            let report = stage.evaluate(&text, &validation_ctx);
            if !report.passed {
                return Err(report);
            }
            if let Some(rewritten) = report.normalized_text {
                text = rewritten;
            }
        }
        Ok(text)
    }

    fn accept(&self, answer: String, ctx: &RequestContext) -> QueryResult {
        // Re-extract markers from the final text: integrity trimming may
        // have dropped a sentence and its citation with it. Extraction maps
        // only against this request's retrieval, so no citation can ever
        // reference a chunk outside it.
        let cited_ids = citations::extract(&answer, self.generator.context_hits(&ctx.retrieval));

        let citations: Vec<Citation> = cited_ids
            .into_iter()
            .filter_map(|chunk_id| {
                ctx.retrieval.fused_score_of(&chunk_id).map(|score| Citation {
                    chunk_id,
                    relevance_score: score,
                })
            })
            .collect();

        info!(
            citations = citations.len(),
            confidence = ?ctx.retrieval.confidence,
            elapsed_ms = ctx.elapsed_ms(),
            "answer accepted"
        );

        QueryResult {
            answer,
            confidence: ctx.retrieval.confidence,
            is_grounded: true,
            is_refusal: false,
            refusal: None,
            citations,
            processing_time_ms: ctx.elapsed_ms(),
        }
    }

    fn refuse(&self, ctx: &RequestContext, kind: RefusalKind) -> QueryResult {
        info!(?kind, "request refused");
        QueryResult::refusal_result(
            kind,
            refusal::message_for(kind),
            ctx.retrieval.confidence,
            ctx.elapsed_ms(),
        )
    }
}
