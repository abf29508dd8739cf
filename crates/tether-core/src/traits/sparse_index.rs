use async_trait::async_trait;

use crate::errors::TetherResult;

/// Sparse lexical index over pre-tokenized chunks.
#[async_trait]
pub trait ISparseIndex: Send + Sync {
    /// Rank chunks by lexical score against the query tokens, best first.
    async fn search(&self, query_tokens: &[String], k: usize) -> TetherResult<Vec<(String, f32)>>;
}
