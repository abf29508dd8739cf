use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use tether_core::errors::{RetrievalError, TetherResult};
use tether_core::models::Chunk;
use tether_core::traits::IVectorIndex;

/// Brute-force cosine index over an immutable chunk snapshot.
///
/// Doubles as the chunk store: ids returned by either index resolve here.
pub struct MemoryVectorIndex {
    snapshot: RwLock<Arc<VectorSnapshot>>,
}

struct VectorSnapshot {
    chunks: Vec<Arc<Chunk>>,
    by_id: HashMap<String, Arc<Chunk>>,
}

impl VectorSnapshot {
    fn build(chunks: Vec<Chunk>) -> Self {
        let chunks: Vec<Arc<Chunk>> = chunks.into_iter().map(Arc::new).collect();
        let by_id = chunks
            .iter()
            .map(|c| (c.id.clone(), Arc::clone(c)))
            .collect();
        Self { chunks, by_id }
    }
}

impl MemoryVectorIndex {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(VectorSnapshot::build(chunks))),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Publish a rebuilt snapshot. In-flight searches keep the snapshot
    /// they loaded; new searches see the new one.
    pub fn publish(&self, chunks: Vec<Chunk>) -> TetherResult<()> {
        let snapshot = Arc::new(VectorSnapshot::build(chunks));
        let mut guard = self.snapshot.write().map_err(|_| poisoned())?;
        *guard = snapshot;
        Ok(())
    }

    fn load(&self) -> TetherResult<Arc<VectorSnapshot>> {
        Ok(Arc::clone(&self.snapshot.read().map_err(|_| poisoned())?))
    }
}

fn poisoned() -> RetrievalError {
    RetrievalError::IndexUnavailable {
        reason: "index lock poisoned".to_string(),
    }
}

/// Cosine similarity. Zero when either vector is zero or dimensions differ.
fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom <= f32::EPSILON {
        0.0
    } else {
        dot / denom
    }
}

#[async_trait]
impl IVectorIndex for MemoryVectorIndex {
    async fn search(&self, query_embedding: &[f32], k: usize) -> TetherResult<Vec<(String, f32)>> {
        let snapshot = self.load()?;

        let mut scored: Vec<(String, f32)> = snapshot
            .chunks
            .iter()
            .map(|c| (c.id.clone(), cosine(query_embedding, &c.dense_vector)))
            .filter(|(_, score)| *score > 0.0)
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k);
        Ok(scored)
    }

    fn chunk(&self, id: &str) -> Option<Arc<Chunk>> {
        self.snapshot
            .read()
            .ok()
            .and_then(|s| s.by_id.get(id).map(Arc::clone))
    }
}
