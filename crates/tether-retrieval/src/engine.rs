//! HybridRetriever: dense + sparse search → weighted RRF → dedup → tier.

use std::sync::Arc;

use tether_core::config::RetrievalConfig;
use tether_core::models::{Query, RetrievalHit, RetrievalResult};
use tether_core::text;
use tether_core::traits::{IEmbeddingProvider, ISparseIndex, IVectorIndex};
use tracing::{debug, info, warn};

use crate::confidence;
use crate::dedup;
use crate::search::{fuse, FusedCandidate, RankedList};

/// The hybrid retriever. Shared read-only across concurrent requests;
/// every call produces a fresh, request-owned `RetrievalResult`.
pub struct HybridRetriever {
    vector: Arc<dyn IVectorIndex>,
    sparse: Arc<dyn ISparseIndex>,
    embedder: Arc<dyn IEmbeddingProvider>,
    config: RetrievalConfig,
}

impl HybridRetriever {
    pub fn new(
        vector: Arc<dyn IVectorIndex>,
        sparse: Arc<dyn ISparseIndex>,
        embedder: Arc<dyn IEmbeddingProvider>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            vector,
            sparse,
            embedder,
            config,
        }
    }

    /// Retrieve fused candidates for a query.
    ///
    /// An unreachable index degrades that list to empty; when both lists are
    /// unavailable the result is empty with confidence `None`. Errors never
    /// escape this component.
    pub async fn retrieve(&self, query: &Query, top_k: usize) -> RetrievalResult {
        if query.normalized.is_empty() {
            return RetrievalResult::unavailable();
        }

        // Fetch more than top_k from each list so fusion and dedup have
        // material to work with.
        let fetch_k = top_k * 2;

        let mut dense_list = match self.dense_search(query, fetch_k).await {
            Ok(list) => list,
            Err(reason) => {
                warn!(%reason, "dense search unavailable");
                Vec::new()
            }
        };
        // Rank positions carry no absolute relevance, so weak cosines must
        // not enter fusion at all.
        dense_list.retain(|(_, score)| *score >= self.config.min_dense_score);

        // Stopword matches carry no relevance but would still earn a rank,
        // so they are excluded before the sparse index sees the query.
        let query_tokens = text::content_tokens(&query.normalized);
        let sparse_list = match self.sparse.search(&query_tokens, fetch_k).await {
            Ok(list) => list,
            Err(e) => {
                warn!(reason = %e, "sparse search unavailable");
                Vec::new()
            }
        };

        if dense_list.is_empty() && sparse_list.is_empty() {
            debug!("no candidates from either list");
            return RetrievalResult::unavailable();
        }

        let candidates = fuse(
            RankedList {
                entries: &dense_list,
                weight: self.config.dense_weight,
            },
            RankedList {
                entries: &sparse_list,
                weight: self.config.sparse_weight,
            },
            self.config.rrf_k,
        );

        // Resolve chunks; ids the store no longer knows are dropped.
        let resolved: Vec<(FusedCandidate, _)> = candidates
            .into_iter()
            .filter_map(|c| {
                let chunk = self.vector.chunk(&c.chunk_id)?;
                Some((c, chunk))
            })
            .collect();

        let selected = dedup::select(resolved, self.config.dedup_overlap, top_k);

        let hits: Vec<RetrievalHit> = selected
            .into_iter()
            .map(|(c, chunk)| RetrievalHit {
                chunk,
                dense_score: c.dense_score,
                sparse_rank: c.sparse_rank,
                fused_score: c.fused_score,
            })
            .collect();

        let top_score = hits.first().map(|h| h.fused_score).unwrap_or(0.0);
        let tier = confidence::tier_for(top_score, &self.config);

        info!(
            hits = hits.len(),
            top_score,
            tier = ?tier,
            "hybrid retrieval complete"
        );

        RetrievalResult {
            hits,
            confidence: tier,
        }
    }

    async fn dense_search(&self, query: &Query, k: usize) -> Result<Vec<(String, f32)>, String> {
        if !self.embedder.is_available() {
            return Err("embedding provider unavailable".to_string());
        }
        let embedding = self
            .embedder
            .embed(&query.normalized)
            .map_err(|e| e.to_string())?;
        self.vector
            .search(&embedding, k)
            .await
            .map_err(|e| e.to_string())
    }
}
