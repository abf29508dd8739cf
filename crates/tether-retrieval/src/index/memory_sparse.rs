use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use tether_core::errors::{RetrievalError, TetherResult};
use tether_core::models::Chunk;
use tether_core::text;
use tether_core::traits::ISparseIndex;

/// Term-frequency / inverse-document-frequency lexical index.
pub struct MemorySparseIndex {
    snapshot: RwLock<Arc<SparseSnapshot>>,
}

struct SparseSnapshot {
    doc_count: usize,
    /// Document frequency per term.
    df: HashMap<String, usize>,
    docs: Vec<SparseDoc>,
}

struct SparseDoc {
    id: String,
    tf: HashMap<String, u32>,
    token_count: usize,
}

impl SparseSnapshot {
    fn build(chunks: &[Chunk]) -> Self {
        let mut df: HashMap<String, usize> = HashMap::new();
        let mut docs = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            let tokens = if chunk.sparse_tokens.is_empty() {
                text::tokenize(&chunk.text)
            } else {
                chunk.sparse_tokens.clone()
            };

            let mut tf: HashMap<String, u32> = HashMap::new();
            for token in &tokens {
                *tf.entry(token.clone()).or_default() += 1;
            }
            for term in tf.keys() {
                *df.entry(term.clone()).or_default() += 1;
            }
            docs.push(SparseDoc {
                id: chunk.id.clone(),
                token_count: tokens.len(),
                tf,
            });
        }

        Self {
            doc_count: chunks.len(),
            df,
            docs,
        }
    }

    fn idf(&self, term: &str) -> f32 {
        let df = self.df.get(term).copied().unwrap_or(0);
        if df == 0 {
            return 0.0;
        }
        (1.0 + self.doc_count as f32 / df as f32).ln()
    }
}

impl MemorySparseIndex {
    pub fn new(chunks: &[Chunk]) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(SparseSnapshot::build(chunks))),
        }
    }

    pub fn empty() -> Self {
        Self::new(&[])
    }

    /// Publish a rebuilt snapshot with a single pointer swap.
    pub fn publish(&self, chunks: &[Chunk]) -> TetherResult<()> {
        let snapshot = Arc::new(SparseSnapshot::build(chunks));
        let mut guard = self.snapshot.write().map_err(|_| poisoned())?;
        *guard = snapshot;
        Ok(())
    }
}

fn poisoned() -> RetrievalError {
    RetrievalError::IndexUnavailable {
        reason: "index lock poisoned".to_string(),
    }
}

#[async_trait]
impl ISparseIndex for MemorySparseIndex {
    async fn search(&self, query_tokens: &[String], k: usize) -> TetherResult<Vec<(String, f32)>> {
        let snapshot = Arc::clone(&self.snapshot.read().map_err(|_| poisoned())?);

        let mut scored: Vec<(String, f32)> = snapshot
            .docs
            .iter()
            .filter_map(|doc| {
                if doc.token_count == 0 {
                    return None;
                }
                let mut score = 0.0f32;
                for term in query_tokens {
                    if let Some(tf) = doc.tf.get(term) {
                        let tf_norm = *tf as f32 / doc.token_count as f32;
                        score += tf_norm * snapshot.idf(term);
                    }
                }
                (score > 0.0).then(|| (doc.id.clone(), score))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k);
        Ok(scored)
    }
}
