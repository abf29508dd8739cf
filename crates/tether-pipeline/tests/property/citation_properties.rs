//! Citation round-trip property: whatever the provider emits, a returned
//! citation always references a chunk retrieved for that same request.

use std::sync::Arc;

use async_trait::async_trait;
use proptest::prelude::*;
use tether_core::config::TetherConfig;
use tether_core::errors::TetherResult;
use tether_core::models::{Chunk, Completion, TokenUsage};
use tether_core::traits::IGenerationProvider;
use tether_pipeline::Pipeline;
use tether_retrieval::{MemorySparseIndex, MemoryVectorIndex};

const VOCAB: &[&str] = &[
    "canary", "deploy", "rollback", "cache", "fleet", "traffic", "incident", "batch", "broker",
    "eviction", "policy", "release", "pager", "quota", "shard",
];

/// Echoes the first context passage back as the answer, always citing [1]
/// and always attempting a fabricated out-of-range marker.
struct EchoProvider;

#[async_trait]
impl IGenerationProvider for EchoProvider {
    async fn complete(
        &self,
        prompt: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> TetherResult<Completion> {
        let passage = prompt
            .lines()
            .find(|l| l.starts_with("[1] ("))
            .and_then(|l| l.split_once(") ").map(|(_, text)| text))
            .unwrap_or("nothing retrieved");
        Ok(Completion {
            text: format!("{} [1] [99].", passage.trim_end_matches('.')),
            truncated: false,
            usage: TokenUsage::default(),
        })
    }

    fn name(&self) -> &str {
        "echo"
    }
}

fn build_corpus(word_picks: &[Vec<usize>]) -> Vec<Chunk> {
    let embedder = test_fixtures::embedder();
    word_picks
        .iter()
        .enumerate()
        .map(|(i, picks)| {
            let body = picks
                .iter()
                .map(|w| VOCAB[w % VOCAB.len()])
                .collect::<Vec<_>>()
                .join(" ")
                + ".";
            test_fixtures::chunk(&embedder, &format!("chunk-{i}"), "generated", &body)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn no_fabricated_citations_over_random_corpora(
        word_picks in prop::collection::vec(
            prop::collection::vec(0usize..64, 5..12),
            2..8,
        ),
        query_picks in prop::collection::vec(0usize..64, 3..6),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("runtime");

        let chunks = build_corpus(&word_picks);
        let corpus_ids: Vec<String> = chunks.iter().map(|c| c.id.clone()).collect();

        let vector = Arc::new(MemoryVectorIndex::new(chunks.clone()));
        let sparse = Arc::new(MemorySparseIndex::new(&chunks));
        let embedder = Arc::new(test_fixtures::embedder());

        let mut config = TetherConfig::default();
        config.pipeline.backoff_ms = 1;
        let pipeline = Pipeline::new(config, vector, sparse, embedder, Arc::new(EchoProvider));

        let query = query_picks
            .iter()
            .map(|w| VOCAB[w % VOCAB.len()])
            .collect::<Vec<_>>()
            .join(" ");

        let result = runtime.block_on(pipeline.query(&query, None));

        for citation in &result.citations {
            prop_assert!(
                corpus_ids.contains(&citation.chunk_id),
                "fabricated citation {} for query {:?}",
                citation.chunk_id,
                query
            );
            prop_assert!(citation.relevance_score > 0.0);
        }
        if result.is_refusal {
            prop_assert!(result.citations.is_empty());
        }
    }
}
