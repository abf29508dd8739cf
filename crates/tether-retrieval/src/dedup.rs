//! Near-duplicate suppression over fused candidates.
//!
//! Walks the fused ranking best-first and drops any chunk whose token set
//! largely overlaps an already-selected higher-ranked chunk. Runs before
//! truncation to top_k so duplicates don't crowd out distinct material.

use std::collections::HashSet;
use std::sync::Arc;

use tether_core::models::Chunk;
use tether_core::text;

/// Select up to `top_k` chunks, skipping near-duplicates.
///
/// `overlap_threshold` is the containment ratio (shared tokens over the
/// smaller token set) above which the lower-ranked chunk is dropped.
pub fn select<T>(
    ranked: Vec<(T, Arc<Chunk>)>,
    overlap_threshold: f64,
    top_k: usize,
) -> Vec<(T, Arc<Chunk>)> {
    let mut selected: Vec<(T, Arc<Chunk>)> = Vec::new();
    let mut selected_tokens: Vec<HashSet<String>> = Vec::new();

    for (payload, chunk) in ranked {
        if selected.len() >= top_k {
            break;
        }
        let tokens = token_set(&chunk);
        let duplicate = selected_tokens
            .iter()
            .any(|prior| containment(&tokens, prior) >= overlap_threshold);
        if duplicate {
            continue;
        }
        selected_tokens.push(tokens);
        selected.push((payload, chunk));
    }

    selected
}

fn token_set(chunk: &Chunk) -> HashSet<String> {
    if chunk.sparse_tokens.is_empty() {
        text::tokenize(&chunk.text).into_iter().collect()
    } else {
        chunk.sparse_tokens.iter().cloned().collect()
    }
}

/// Shared-token fraction of the smaller set. 1.0 when one set contains
/// the other, 0.0 when disjoint or either set is empty.
fn containment(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let min_len = a.len().min(b.len());
    if min_len == 0 {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    shared as f64 / min_len as f64
}
