use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Chunk;

/// Discrete confidence bucket derived from the top fused score.
///
/// Tiers are strictly ordered; `None` means generation is skipped entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    None,
    Low,
    Medium,
    High,
}

/// One fused retrieval hit. Scores from lists the chunk was absent from
/// are `None`; the fused score is always present.
#[derive(Debug, Clone)]
pub struct RetrievalHit {
    pub chunk: Arc<Chunk>,
    /// Cosine similarity from the dense list, if the chunk appeared there.
    pub dense_score: Option<f32>,
    /// Zero-based rank in the sparse list, if the chunk appeared there.
    pub sparse_rank: Option<usize>,
    /// Weighted reciprocal-rank-fusion score.
    pub fused_score: f64,
}

impl RetrievalHit {
    pub fn chunk_id(&self) -> &str {
        &self.chunk.id
    }
}

/// Ordered fusion output plus the derived confidence tier.
#[derive(Debug, Clone)]
pub struct RetrievalResult {
    /// Hits sorted by descending fused score, deduplicated, truncated to top_k.
    pub hits: Vec<RetrievalHit>,
    pub confidence: ConfidenceTier,
}

impl RetrievalResult {
    /// The empty result used when an index is unreachable.
    pub fn unavailable() -> Self {
        Self {
            hits: Vec::new(),
            confidence: ConfidenceTier::None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Whether a chunk id was retrieved for this request.
    pub fn contains(&self, chunk_id: &str) -> bool {
        self.hits.iter().any(|h| h.chunk_id() == chunk_id)
    }

    /// Fused score for a retrieved chunk id.
    pub fn fused_score_of(&self, chunk_id: &str) -> Option<f64> {
        self.hits
            .iter()
            .find(|h| h.chunk_id() == chunk_id)
            .map(|h| h.fused_score)
    }
}
