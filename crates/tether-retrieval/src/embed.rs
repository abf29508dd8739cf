//! Deterministic hashed embedding provider.
//!
//! Buckets content unigrams and adjacent-pair bigrams into a fixed-dimension
//! vector weighted by term frequency. Always available, no model files, same
//! input always yields the same vector — which is what the determinism
//! guarantees in the pipeline tests rely on. Stopwords are excluded so a
//! shared "the" never manufactures similarity between unrelated texts.

use tether_core::errors::TetherResult;
use tether_core::text;
use tether_core::traits::IEmbeddingProvider;

pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// FNV-1a over the term bytes, reduced to a bucket index.
    fn bucket(&self, term: &str) -> usize {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in term.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        (hash as usize) % self.dimensions
    }

    fn vector(&self, input: &str) -> Vec<f32> {
        let tokens = text::content_tokens(input);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        let scale = 1.0 / tokens.len() as f32;
        for token in &tokens {
            // Longer terms are rarer; weight them up as a cheap idf stand-in.
            let weight = 1.0 + (token.len() as f32).ln();
            vec[self.bucket(token)] += scale * weight;
        }
        // Bigram buckets capture adjacency so word order shifts the vector.
        for pair in tokens.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            vec[self.bucket(&bigram)] += scale * 0.5;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for HashEmbedder {
    fn embed(&self, input: &str) -> TetherResult<Vec<f32>> {
        Ok(self.vector(input))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hash-embedder"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_across_calls() {
        let e = HashEmbedder::new(256);
        assert_eq!(
            e.embed("canary deployments").unwrap(),
            e.embed("canary deployments").unwrap()
        );
    }

    #[test]
    fn unit_norm_for_nonempty_input() {
        let e = HashEmbedder::new(128);
        let v = e.embed("rollback restores the previous release").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn empty_input_is_zero_vector() {
        let e = HashEmbedder::new(64);
        let v = e.embed("").unwrap();
        assert_eq!(v.len(), 64);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn related_texts_closer_than_unrelated() {
        let e = HashEmbedder::new(512);
        let a = e.embed("canary deployment traffic").unwrap();
        let b = e.embed("canary deployment rollout").unwrap();
        let c = e.embed("lasagna recipe oven").unwrap();
        let dot = |x: &[f32], y: &[f32]| -> f32 { x.iter().zip(y).map(|(p, q)| p * q).sum() };
        assert!(dot(&a, &b) > dot(&a, &c));
    }

    #[test]
    fn word_order_changes_the_vector() {
        let e = HashEmbedder::new(512);
        let ab = e.embed("canary rollback").unwrap();
        let ba = e.embed("rollback canary").unwrap();
        assert_ne!(ab, ba);
    }
}
