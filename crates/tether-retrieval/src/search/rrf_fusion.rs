//! Weighted Reciprocal Rank Fusion: score = Σ_lists weight_list / (k + rank).
//!
//! Combines the dense and sparse rankings into a single fused ranking
//! without requiring score normalization across retrieval methods.
//! Chunks absent from a list contribute nothing for that list.

use std::collections::HashMap;

/// One ranked input list with its fusion weight.
pub struct RankedList<'a> {
    /// (chunk_id, raw score) pairs, best first. Only the position matters
    /// for fusion; the raw score is carried through for reporting.
    pub entries: &'a [(String, f32)],
    pub weight: f64,
}

/// A chunk after fusion, before deduplication and chunk resolution.
#[derive(Debug, Clone)]
pub struct FusedCandidate {
    pub chunk_id: String,
    /// Raw similarity from the dense list, when present there.
    pub dense_score: Option<f32>,
    /// Zero-based rank in the sparse list, when present there.
    pub sparse_rank: Option<usize>,
    pub fused_score: f64,
}

/// Fuse a dense and a sparse ranking.
///
/// `k` is the RRF smoothing constant (default 60). Ties in fused score are
/// broken by chunk id so the output ordering is fully deterministic.
pub fn fuse(dense: RankedList<'_>, sparse: RankedList<'_>, k: u32) -> Vec<FusedCandidate> {
    let mut scores: HashMap<&str, f64> = HashMap::new();

    for (rank, (id, _)) in dense.entries.iter().enumerate() {
        *scores.entry(id.as_str()).or_default() += dense.weight / (k as f64 + rank as f64 + 1.0);
    }
    for (rank, (id, _)) in sparse.entries.iter().enumerate() {
        *scores.entry(id.as_str()).or_default() += sparse.weight / (k as f64 + rank as f64 + 1.0);
    }

    let dense_scores: HashMap<&str, f32> = dense
        .entries
        .iter()
        .map(|(id, s)| (id.as_str(), *s))
        .collect();
    let sparse_ranks: HashMap<&str, usize> = sparse
        .entries
        .iter()
        .enumerate()
        .map(|(rank, (id, _))| (id.as_str(), rank))
        .collect();

    let mut candidates: Vec<FusedCandidate> = scores
        .into_iter()
        .map(|(id, fused_score)| FusedCandidate {
            chunk_id: id.to_string(),
            dense_score: dense_scores.get(id).copied(),
            sparse_rank: sparse_ranks.get(id).copied(),
            fused_score,
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.fused_score
            .partial_cmp(&a.fused_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.chunk_id.cmp(&b.chunk_id))
    });

    candidates
}

/// Upper bound on a fused score under the given weights and constant:
/// the score of a chunk ranked first in every list.
pub fn max_fused_score(dense_weight: f64, sparse_weight: f64, k: u32) -> f64 {
    (dense_weight + sparse_weight) / (k as f64 + 1.0)
}
