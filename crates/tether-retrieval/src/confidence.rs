//! Fused-score → confidence-tier mapping.

use tether_core::config::RetrievalConfig;
use tether_core::models::ConfidenceTier;

use crate::search::rrf_fusion;

/// Map the top fused score to a tier via the configured ascending thresholds.
///
/// The score is first normalized against the maximum attainable fused score
/// under the current weights, so thresholds live on a stable [0, 1] scale
/// regardless of `rrf_k`. Below `tier_low` the tier is `None` and the
/// orchestrator skips generation entirely.
pub fn tier_for(top_fused_score: f64, config: &RetrievalConfig) -> ConfidenceTier {
    let max = rrf_fusion::max_fused_score(config.dense_weight, config.sparse_weight, config.rrf_k);
    if max <= 0.0 {
        return ConfidenceTier::None;
    }
    let normalized = (top_fused_score / max).clamp(0.0, 1.0);

    if normalized >= config.tier_high {
        ConfidenceTier::High
    } else if normalized >= config.tier_medium {
        ConfidenceTier::Medium
    } else if normalized >= config.tier_low {
        ConfidenceTier::Low
    } else {
        ConfidenceTier::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RetrievalConfig {
        RetrievalConfig::default()
    }

    #[test]
    fn top_of_both_lists_is_high() {
        let c = config();
        let max = rrf_fusion::max_fused_score(c.dense_weight, c.sparse_weight, c.rrf_k);
        assert_eq!(tier_for(max, &c), ConfidenceTier::High);
    }

    #[test]
    fn zero_score_is_none() {
        assert_eq!(tier_for(0.0, &config()), ConfidenceTier::None);
    }

    #[test]
    fn tier_is_monotonic_in_score() {
        let c = config();
        let max = rrf_fusion::max_fused_score(c.dense_weight, c.sparse_weight, c.rrf_k);
        let mut last = ConfidenceTier::None;
        for step in 0..=100 {
            let tier = tier_for(max * step as f64 / 100.0, &c);
            assert!(tier >= last, "tier regressed at step {step}");
            last = tier;
        }
        assert_eq!(last, ConfidenceTier::High);
    }
}
