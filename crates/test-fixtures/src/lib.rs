//! Shared test support: a small seeded corpus over the in-memory indexes
//! and a scripted generation provider for deterministic integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tether_core::errors::{GenerationError, TetherResult};
use tether_core::models::{Chunk, ChunkMetadata, Completion, TokenUsage};
use tether_core::text;
use tether_core::traits::{IEmbeddingProvider, IGenerationProvider};
use tether_retrieval::{HashEmbedder, MemorySparseIndex, MemoryVectorIndex};

pub const EMBED_DIMS: usize = 512;

pub fn embedder() -> HashEmbedder {
    HashEmbedder::new(EMBED_DIMS)
}

/// Build a chunk the way ingestion would: embedded and pre-tokenized.
pub fn chunk(embedder: &HashEmbedder, id: &str, section: &str, body: &str) -> Chunk {
    Chunk {
        id: id.to_string(),
        text: body.to_string(),
        dense_vector: embedder.embed(body).expect("hash embedder is infallible"),
        sparse_tokens: text::tokenize(body),
        metadata: ChunkMetadata {
            source: "platform-runbook".to_string(),
            section: section.to_string(),
            intent: "reference".to_string(),
        },
    }
}

/// The fixture corpus: a handful of platform-runbook passages.
pub fn corpus() -> Vec<Chunk> {
    let e = embedder();
    vec![
        chunk(
            &e,
            "deploy-01",
            "deploys",
            "Deployments roll out in three stages: canary, batch, and full fleet. \
             The canary stage receives five percent of traffic for ten minutes \
             before the batch stage begins.",
        ),
        chunk(
            &e,
            "deploy-02",
            "deploys",
            "A rollback restores the previous release within two minutes and pins \
             the fleet until the incident is resolved.",
        ),
        chunk(
            &e,
            "cache-01",
            "caching",
            "The edge cache evicts entries with a least recently used policy and a \
             default time to live of one hour.",
        ),
        chunk(
            &e,
            "auth-01",
            "auth",
            "Service tokens rotate every twenty four hours and are fetched from the \
             credential broker at startup.",
        ),
        chunk(
            &e,
            "oncall-01",
            "oncall",
            "The on call engineer acknowledges pages within five minutes and opens \
             an incident channel for anything user facing.",
        ),
    ]
}

/// Keywords that mark fixture queries as in-domain.
pub fn domain_keywords() -> Vec<String> {
    ["deploy", "deployment", "canary", "rollback", "cache", "token", "incident"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Indexes seeded with the fixture corpus.
pub fn seeded_indexes() -> (Arc<MemoryVectorIndex>, Arc<MemorySparseIndex>) {
    let chunks = corpus();
    (
        Arc::new(MemoryVectorIndex::new(chunks.clone())),
        Arc::new(MemorySparseIndex::new(&chunks)),
    )
}

// ── Scripted provider ──────────────────────────────────────────────────────

struct Rule {
    marker: String,
    queued: VecDeque<Completion>,
    repeat: Option<Completion>,
}

struct Inner {
    rules: Vec<Rule>,
    failures: VecDeque<GenerationError>,
    calls: u32,
}

/// Deterministic generation provider driven by prompt-content rules.
///
/// Rules match on a substring of the prompt (typically the question text).
/// Queued replies are consumed in order, then the repeat reply applies.
/// Injected failures are consumed before any rule matching, which is how
/// tests exercise the orchestrator's backoff path.
pub struct ScriptedProvider {
    inner: Mutex<Inner>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                rules: Vec::new(),
                failures: VecDeque::new(),
                calls: 0,
            }),
        }
    }

    fn completion(text: &str, truncated: bool) -> Completion {
        Completion {
            text: text.to_string(),
            truncated,
            usage: TokenUsage {
                prompt_tokens: 64,
                completion_tokens: 32,
            },
        }
    }

    /// Always answer prompts containing `marker` with `text`.
    pub fn with_reply(self, marker: &str, text: &str) -> Self {
        self.add_rule(marker, None, Some(Self::completion(text, false)));
        self
    }

    /// Always answer prompts containing `marker` with a truncated completion.
    pub fn with_truncated_reply(self, marker: &str, text: &str) -> Self {
        self.add_rule(marker, None, Some(Self::completion(text, true)));
        self
    }

    /// Queue a one-shot reply for prompts containing `marker`; consumed
    /// before the repeat reply.
    pub fn push_reply(self, marker: &str, text: &str) -> Self {
        self.add_rule(marker, Some(Self::completion(text, false)), None);
        self
    }

    /// Queue a one-shot truncated reply.
    pub fn push_truncated_reply(self, marker: &str, text: &str) -> Self {
        self.add_rule(marker, Some(Self::completion(text, true)), None);
        self
    }

    /// Fail the next `n` calls with a transient upstream error.
    pub fn with_failures(self, n: usize) -> Self {
        {
            let mut inner = self.inner.lock().expect("fixture lock");
            for _ in 0..n {
                inner.failures.push_back(GenerationError::Upstream {
                    reason: "scripted outage".to_string(),
                });
            }
        }
        self
    }

    /// Total completed calls, including injected failures.
    pub fn calls(&self) -> u32 {
        self.inner.lock().expect("fixture lock").calls
    }

    fn add_rule(&self, marker: &str, queued: Option<Completion>, repeat: Option<Completion>) {
        let mut inner = self.inner.lock().expect("fixture lock");
        if let Some(rule) = inner.rules.iter_mut().find(|r| r.marker == marker) {
            if let Some(c) = queued {
                rule.queued.push_back(c);
            }
            if repeat.is_some() {
                rule.repeat = repeat;
            }
            return;
        }
        inner.rules.push(Rule {
            marker: marker.to_string(),
            queued: queued.into_iter().collect(),
            repeat,
        });
    }
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IGenerationProvider for ScriptedProvider {
    async fn complete(
        &self,
        prompt: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> TetherResult<Completion> {
        let mut inner = self.inner.lock().expect("fixture lock");
        inner.calls += 1;

        if let Some(err) = inner.failures.pop_front() {
            return Err(err.into());
        }

        for rule in inner.rules.iter_mut() {
            if prompt.contains(&rule.marker) {
                if let Some(c) = rule.queued.pop_front() {
                    return Ok(c);
                }
                if let Some(c) = &rule.repeat {
                    return Ok(c.clone());
                }
            }
        }

        Ok(Self::completion(
            "I don't know based on the available documentation.",
            false,
        ))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
