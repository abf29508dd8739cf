use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::TetherResult;
use crate::models::Chunk;

/// Dense vector index. Read-only during serving; rebuilds are published
/// out-of-band as whole snapshots so no reader observes a partial index.
#[async_trait]
pub trait IVectorIndex: Send + Sync {
    /// Rank chunks by similarity to the query embedding, best first.
    async fn search(&self, query_embedding: &[f32], k: usize) -> TetherResult<Vec<(String, f32)>>;

    /// Resolve a chunk id to its immutable chunk. The vector index doubles
    /// as the chunk store: ids returned by either index resolve here.
    fn chunk(&self, id: &str) -> Option<Arc<Chunk>>;
}
