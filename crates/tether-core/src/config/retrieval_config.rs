use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid retriever configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Result count after fusion and deduplication.
    pub top_k: usize,
    /// RRF smoothing constant. Higher values flatten the contribution of
    /// top-ranked items from any single list.
    pub rrf_k: u32,
    /// Fusion weight for the dense (vector) list.
    pub dense_weight: f64,
    /// Fusion weight for the sparse (lexical) list.
    pub sparse_weight: f64,
    /// Token-overlap ratio above which a lower-ranked chunk is dropped
    /// as a near-duplicate of an already-selected one.
    pub dedup_overlap: f64,
    /// Cosine floor for dense hits entering fusion.
    pub min_dense_score: f32,
    /// Ascending confidence-tier thresholds over the normalized top score.
    pub tier_low: f64,
    pub tier_medium: f64,
    pub tier_high: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            rrf_k: defaults::DEFAULT_RRF_K,
            dense_weight: defaults::DEFAULT_DENSE_WEIGHT,
            sparse_weight: defaults::DEFAULT_SPARSE_WEIGHT,
            dedup_overlap: defaults::DEFAULT_DEDUP_OVERLAP,
            min_dense_score: defaults::DEFAULT_MIN_DENSE_SCORE,
            tier_low: defaults::DEFAULT_TIER_LOW,
            tier_medium: defaults::DEFAULT_TIER_MEDIUM,
            tier_high: defaults::DEFAULT_TIER_HIGH,
        }
    }
}
