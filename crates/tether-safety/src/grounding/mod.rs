//! The grounding firewall — the terminal, non-negotiable gate.
//!
//! Every claim in the answer must trace back to retrieved content. An
//! ungrounded answer is never returned, even partially: on failure the
//! orchestrator substitutes the canonical refusal, and the bar never moves
//! across retries.

mod claims;
mod support;

use tether_core::config::SafetyConfig;
use tether_core::models::{RetrievalResult, StageReport, ValidationStage};
use tether_core::traits::{IValidatorStage, ValidationContext};
use tracing::debug;

pub use support::{LexicalOverlap, SupportMetric};

/// Grounding verdict for one candidate answer.
#[derive(Debug, Clone)]
pub struct GroundingReport {
    /// Fraction of claims whose best passage overlap met the per-claim bar.
    pub grounding_score: f64,
    pub is_grounded: bool,
    /// Claims that found no supporting passage.
    pub missing_support: Vec<String>,
}

pub struct GroundingFirewall {
    metric: Box<dyn SupportMetric>,
}

impl GroundingFirewall {
    pub fn new() -> Self {
        Self {
            metric: Box::new(LexicalOverlap),
        }
    }

    /// Swap in a different support metric.
    pub fn with_metric(metric: Box<dyn SupportMetric>) -> Self {
        Self { metric }
    }

    /// Score each claim against the retrieved passages.
    ///
    /// `is_grounded` requires both the global score minimum and at least
    /// one citation — an uncited answer is ungrounded no matter how well
    /// its words overlap.
    pub fn evaluate(
        &self,
        text: &str,
        retrieval: &RetrievalResult,
        citations: &[String],
        config: &SafetyConfig,
    ) -> GroundingReport {
        let claim_units = claims::split_claims(text);
        if claim_units.is_empty() {
            return GroundingReport {
                grounding_score: 0.0,
                is_grounded: false,
                missing_support: Vec::new(),
            };
        }

        let mut supported = 0usize;
        let mut missing = Vec::new();

        for claim in &claim_units {
            let best = retrieval
                .hits
                .iter()
                .map(|h| self.metric.support(claim, &h.chunk.text))
                .fold(0.0f64, f64::max);
            if best >= config.claim_overlap_threshold {
                supported += 1;
            } else {
                missing.push(claim.clone());
            }
        }

        let grounding_score = supported as f64 / claim_units.len() as f64;
        let is_grounded = grounding_score >= config.grounding_minimum && !citations.is_empty();

        debug!(
            metric = self.metric.name(),
            claims = claim_units.len(),
            supported,
            grounding_score,
            is_grounded,
            "grounding evaluation complete"
        );

        GroundingReport {
            grounding_score,
            is_grounded,
            missing_support: missing,
        }
    }
}

impl Default for GroundingFirewall {
    fn default() -> Self {
        Self::new()
    }
}

impl IValidatorStage for GroundingFirewall {
    fn stage(&self) -> ValidationStage {
        ValidationStage::Grounding
    }

    fn evaluate(&self, text: &str, ctx: &ValidationContext<'_>) -> StageReport {
        let report = self.evaluate(text, ctx.retrieval, ctx.citations, ctx.config);
        if report.is_grounded {
            StageReport::pass(ValidationStage::Grounding)
        } else {
            StageReport::fail(
                ValidationStage::Grounding,
                format!(
                    "answer not traceable to retrieved content (score {:.2}, {} unsupported claims)",
                    report.grounding_score,
                    report.missing_support.len()
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tether_core::models::{Chunk, ChunkMetadata, ConfidenceTier, RetrievalHit};

    fn retrieval(texts: &[&str]) -> RetrievalResult {
        let hits = texts
            .iter()
            .enumerate()
            .map(|(i, t)| RetrievalHit {
                chunk: Arc::new(Chunk {
                    id: format!("chunk-{i}"),
                    text: t.to_string(),
                    dense_vector: Vec::new(),
                    sparse_tokens: Vec::new(),
                    metadata: ChunkMetadata::default(),
                }),
                dense_score: None,
                sparse_rank: Some(i),
                fused_score: 0.02,
            })
            .collect();
        RetrievalResult {
            hits,
            confidence: ConfidenceTier::High,
        }
    }

    fn config() -> SafetyConfig {
        SafetyConfig::default()
    }

    #[test]
    fn faithful_cited_answer_is_grounded() {
        let fw = GroundingFirewall::new();
        let r = retrieval(&["The canary stage receives five percent of traffic for ten minutes."]);
        let report = fw.evaluate(
            "The canary stage receives five percent of traffic [1].",
            &r,
            &["chunk-0".to_string()],
            &config(),
        );
        assert!(report.is_grounded);
        assert_eq!(report.grounding_score, 1.0);
        assert!(report.missing_support.is_empty());
    }

    #[test]
    fn fabricated_claim_fails_grounding() {
        let fw = GroundingFirewall::new();
        let r = retrieval(&["The canary stage receives five percent of traffic."]);
        let report = fw.evaluate(
            "Deployments require director approval on weekends [1].",
            &r,
            &["chunk-0".to_string()],
            &config(),
        );
        assert!(!report.is_grounded);
        assert_eq!(report.missing_support.len(), 1);
    }

    #[test]
    fn supported_but_uncited_answer_is_not_grounded() {
        let fw = GroundingFirewall::new();
        let r = retrieval(&["The canary stage receives five percent of traffic."]);
        let report = fw.evaluate(
            "The canary stage receives five percent of traffic.",
            &r,
            &[],
            &config(),
        );
        assert_eq!(report.grounding_score, 1.0);
        assert!(!report.is_grounded);
    }

    #[test]
    fn empty_answer_scores_zero() {
        let fw = GroundingFirewall::new();
        let r = retrieval(&["anything"]);
        let report = fw.evaluate("", &r, &[], &config());
        assert_eq!(report.grounding_score, 0.0);
        assert!(!report.is_grounded);
    }

    #[test]
    fn mixed_claims_score_fractionally() {
        let fw = GroundingFirewall::new();
        let r = retrieval(&["The canary stage receives five percent of traffic."]);
        let report = fw.evaluate(
            "The canary stage receives five percent of traffic [1]. \
             Weekend deploys require director approval [1].",
            &r,
            &["chunk-0".to_string()],
            &config(),
        );
        assert!((report.grounding_score - 0.5).abs() < 1e-9);
        assert!(!report.is_grounded);
    }
}
