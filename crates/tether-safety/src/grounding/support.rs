//! Per-claim support metrics.
//!
//! The shipped metric is lexical: the fraction of a claim's content tokens
//! present in a passage. It is deliberately swappable — an embedding-based
//! metric materially changes the refusal rate, and the firewall only
//! depends on this trait.

use std::collections::HashSet;

use tether_core::text;

/// Scores how well a single passage supports a single claim, in [0, 1].
pub trait SupportMetric: Send + Sync {
    fn support(&self, claim: &str, passage: &str) -> f64;

    fn name(&self) -> &'static str;
}

/// Content-token containment: |claim ∩ passage| / |claim|, stopwords
/// excluded on the claim side.
pub struct LexicalOverlap;

impl SupportMetric for LexicalOverlap {
    fn support(&self, claim: &str, passage: &str) -> f64 {
        let claim_tokens = text::content_tokens(claim);
        if claim_tokens.is_empty() {
            return 0.0;
        }
        let passage_tokens: HashSet<String> = text::tokenize(passage).into_iter().collect();

        let supported = claim_tokens
            .iter()
            .filter(|t| passage_tokens.contains(*t))
            .count();
        supported as f64 / claim_tokens.len() as f64
    }

    fn name(&self) -> &'static str {
        "lexical-overlap"
    }
}
