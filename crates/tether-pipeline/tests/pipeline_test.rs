//! End-to-end pipeline tests over the fixture corpus and scripted provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tether_core::config::TetherConfig;
use tether_core::constants::MASK_TOKEN;
use tether_core::errors::TetherResult;
use tether_core::models::{Completion, ConfidenceTier, QueryResult, RefusalKind, TokenUsage};
use tether_core::traits::IGenerationProvider;
use tether_pipeline::{refusal, Pipeline};
use test_fixtures::ScriptedProvider;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn config() -> TetherConfig {
    let mut config = TetherConfig::default();
    config.classifier.domain_keywords = test_fixtures::domain_keywords();
    config.pipeline.backoff_ms = 1;
    config
}

fn pipeline(provider: Arc<dyn IGenerationProvider>) -> Pipeline {
    pipeline_with_config(provider, config())
}

fn pipeline_with_config(provider: Arc<dyn IGenerationProvider>, config: TetherConfig) -> Pipeline {
    let (vector, sparse) = test_fixtures::seeded_indexes();
    let embedder = Arc::new(test_fixtures::embedder());
    Pipeline::new(config, vector, sparse, embedder, provider)
}

const CANARY_ANSWER: &str =
    "The canary stage receives five percent of traffic for ten minutes [1].";

// ── Scenario A: confident domain query ─────────────────────────────────────

#[tokio::test]
async fn domain_query_with_support_is_accepted_with_citations() {
    init_tracing();
    let provider = Arc::new(ScriptedProvider::new().with_reply("canary", CANARY_ANSWER));
    let p = pipeline(provider);

    let result = p
        .query("How much traffic does the canary stage receive?", None)
        .await;

    assert!(!result.is_refusal);
    assert!(result.is_grounded);
    assert!(result.confidence >= ConfidenceTier::Low);
    assert_eq!(result.citations.len(), 1);
    assert_eq!(result.citations[0].chunk_id, "deploy-01");
    assert!(result.citations[0].relevance_score > 0.0);
}

// ── Scenario B: off-topic query ────────────────────────────────────────────

#[tokio::test]
async fn off_topic_query_refused_without_generation() {
    let provider = Arc::new(ScriptedProvider::new());
    let p = pipeline(Arc::clone(&provider) as _);

    let result = p.query("what's the weather today", None).await;

    assert!(result.is_refusal);
    assert_eq!(result.refusal, Some(RefusalKind::NoRelevantInformation));
    assert_eq!(result.answer, refusal::NO_RELEVANT_INFORMATION);
    assert!(result.citations.is_empty());
    assert_eq!(provider.calls(), 0, "generator must not be invoked");
}

// ── Scenario C: truncation recovery ────────────────────────────────────────

#[tokio::test]
async fn recoverable_truncation_is_trimmed_without_retry() {
    let provider = Arc::new(
        ScriptedProvider::new().push_truncated_reply(
            "canary",
            "The canary stage receives five percent of traffic for ten minutes [1]. \
             After that the batch st",
        ),
    );
    let p = pipeline(Arc::clone(&provider) as _);

    let result = p.query("How long does the canary stage run?", None).await;

    assert!(!result.is_refusal);
    assert!(result.answer.ends_with("[1]."));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn unrecoverable_truncation_retries_then_succeeds() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .push_truncated_reply("canary", "The canary stage receives five perc")
            .push_reply("canary", CANARY_ANSWER),
    );
    let p = pipeline(Arc::clone(&provider) as _);

    let result = p.query("How long does the canary stage run?", None).await;

    assert!(!result.is_refusal);
    assert_eq!(result.answer, CANARY_ANSWER);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn answer_never_ends_mid_word() {
    let provider = Arc::new(
        ScriptedProvider::new().with_truncated_reply("canary", "The canary stage receives fi"),
    );
    let p = pipeline(provider);

    let result = p.query("How long does the canary stage run?", None).await;

    // Irrecoverable on every attempt: the pipeline must refuse rather than
    // return a fragment.
    assert!(result.is_refusal);
    assert_eq!(result.refusal, Some(RefusalKind::NoRelevantInformation));
}

// ── Scenario D: credential redaction ───────────────────────────────────────

#[tokio::test]
async fn credential_in_output_is_masked_before_return() {
    let provider = Arc::new(ScriptedProvider::new().with_reply(
        "token",
        "Service tokens rotate every twenty four hours and are fetched from the \
         credential broker at startup using password: abc123 for the legacy tier [1].",
    ));
    let p = pipeline(provider);

    let result = p.query("How often do service tokens rotate?", None).await;

    assert!(
        !result.answer.contains("abc123"),
        "credential leaked: {}",
        result.answer
    );
    if !result.is_refusal {
        assert!(result.answer.contains(MASK_TOKEN));
    }
}

// ── Classifier short-circuits ──────────────────────────────────────────────

#[tokio::test]
async fn greeting_answered_without_retrieval_or_generation() {
    let provider = Arc::new(ScriptedProvider::new());
    let p = pipeline(Arc::clone(&provider) as _);

    let result = p.query("Hello!", None).await;

    assert!(!result.is_refusal);
    assert_eq!(result.answer, refusal::GREETING_REPLY);
    assert!(result.citations.is_empty());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn short_query_requests_clarification() {
    let provider = Arc::new(ScriptedProvider::new());
    let p = pipeline(provider);

    let result = p.query("ok", None).await;

    assert!(result.is_refusal);
    assert_eq!(result.refusal, Some(RefusalKind::ClarificationNeeded));
    assert_eq!(result.answer, refusal::CLARIFICATION_NEEDED);
}

// ── Grounding failures ─────────────────────────────────────────────────────

#[tokio::test]
async fn ungroundable_answer_exhausts_retries_then_refuses() {
    let provider = Arc::new(ScriptedProvider::new().with_reply(
        "canary",
        "Weekend deployments require written director approval [1].",
    ));
    let p = pipeline(Arc::clone(&provider) as _);

    let result = p.query("How long does the canary stage run?", None).await;

    assert!(result.is_refusal);
    assert_eq!(result.refusal, Some(RefusalKind::NoRelevantInformation));
    assert_eq!(result.answer, refusal::NO_RELEVANT_INFORMATION);
    assert!(result.citations.is_empty());
    // First attempt plus max_retries regenerations, thresholds unchanged.
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn model_declared_insufficiency_refuses_without_retry() {
    let provider = Arc::new(ScriptedProvider::new().with_reply(
        "canary",
        "I don't know based on the available documentation.",
    ));
    let p = pipeline(Arc::clone(&provider) as _);

    let result = p.query("How long does the canary stage run?", None).await;

    assert!(result.is_refusal);
    assert_eq!(provider.calls(), 1);
}

// ── Upstream failures ──────────────────────────────────────────────────────

#[tokio::test]
async fn transient_outage_recovers_within_retry_budget() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_failures(1)
            .with_reply("canary", CANARY_ANSWER),
    );
    let p = pipeline(Arc::clone(&provider) as _);

    let result = p.query("How long does the canary stage run?", None).await;

    assert!(!result.is_refusal);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn sustained_outage_refuses_service_unavailable() {
    let provider = Arc::new(ScriptedProvider::new().with_failures(10));
    let p = pipeline(provider);

    let result = p.query("How long does the canary stage run?", None).await;

    assert!(result.is_refusal);
    assert_eq!(result.refusal, Some(RefusalKind::ServiceUnavailable));
    assert_eq!(result.answer, refusal::SERVICE_UNAVAILABLE);
}

// ── Timeout ────────────────────────────────────────────────────────────────

struct StalledProvider;

#[async_trait]
impl IGenerationProvider for StalledProvider {
    async fn complete(
        &self,
        _prompt: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> TetherResult<Completion> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Completion {
            text: String::new(),
            truncated: false,
            usage: TokenUsage::default(),
        })
    }

    fn name(&self) -> &str {
        "stalled"
    }
}

#[tokio::test]
async fn wall_clock_expiry_returns_timeout_refusal() {
    let mut cfg = config();
    cfg.pipeline.timeout_ms = 100;
    let p = pipeline_with_config(Arc::new(StalledProvider), cfg);

    let result = p.query("How long does the canary stage run?", None).await;

    assert!(result.is_refusal);
    assert_eq!(result.refusal, Some(RefusalKind::Timeout));
    assert_eq!(result.answer, refusal::TIMEOUT);
}

// ── Determinism ────────────────────────────────────────────────────────────

#[tokio::test]
async fn repeated_query_yields_same_tier_and_citations() {
    let provider = Arc::new(ScriptedProvider::new().with_reply("canary", CANARY_ANSWER));
    let p = pipeline(provider);

    let first = p.query("How long does the canary stage run?", None).await;
    let second = p.query("How long does the canary stage run?", None).await;

    assert_eq!(first.confidence, second.confidence);
    let ids = |r: &QueryResult| {
        r.citations
            .iter()
            .map(|c| c.chunk_id.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(first.answer, second.answer);
}

// ── Concurrent isolation ───────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_requests_never_share_citations() {
    // Rules key on the question line so each request gets its own reply even
    // though both prompts carry the full retrieved context.
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_reply("How much traffic", CANARY_ANSWER)
            .with_reply(
                "How often do service tokens",
                "Service tokens rotate every twenty four hours and are fetched from \
                 the credential broker at startup [1].",
            ),
    );
    let p = Arc::new(pipeline(provider));

    let mut handles = Vec::new();
    for i in 0..16 {
        let p = Arc::clone(&p);
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                let r = p
                    .query("How much traffic does the canary stage receive?", None)
                    .await;
                (r, "deploy-01")
            } else {
                let r = p.query("How often do service tokens rotate?", None).await;
                (r, "auth-01")
            }
        }));
    }

    for handle in handles {
        let (result, expected) = handle.await.expect("task panicked");
        assert!(!result.is_refusal);
        assert!(
            result.citations.iter().all(|c| c.chunk_id == expected),
            "cross-request citation leak: expected only {expected}, got {:?}",
            result.citations
        );
    }
}

// ── Refusal/grounding relationship ─────────────────────────────────────────

#[tokio::test]
async fn accepted_results_are_grounded_and_refusals_are_not() {
    let provider = Arc::new(ScriptedProvider::new().with_reply("canary", CANARY_ANSWER));
    let p = pipeline(provider);

    let accepted = p.query("How long does the canary stage run?", None).await;
    assert!(accepted.is_grounded && !accepted.is_refusal);

    let refused = p.query("what's the weather today", None).await;
    assert!(refused.is_refusal && !refused.is_grounded);
    assert_eq!(refused.confidence, ConfidenceTier::None);
}
