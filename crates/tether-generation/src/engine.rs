//! GroundedGenerator: prompt → provider → attempt.

use std::sync::Arc;

use tether_core::config::GenerationConfig;
use tether_core::constants::MAX_PROMPT_CHUNKS;
use tether_core::errors::TetherResult;
use tether_core::models::{GenerationAttempt, Query, RetrievalResult};
use tether_core::traits::IGenerationProvider;
use tracing::debug;

use crate::citations;
use crate::prompt;

/// The grounded generator. Stateless across requests; each call produces a
/// fresh, request-owned `GenerationAttempt`.
pub struct GroundedGenerator {
    provider: Arc<dyn IGenerationProvider>,
    config: GenerationConfig,
}

impl GroundedGenerator {
    pub fn new(provider: Arc<dyn IGenerationProvider>, config: GenerationConfig) -> Self {
        Self { provider, config }
    }

    /// The retrieval hits that enter the prompt, in marker order.
    ///
    /// Citation markers are relative to this slice, so callers mapping
    /// markers back to chunks must use it too.
    pub fn context_hits<'a>(
        &self,
        retrieval: &'a RetrievalResult,
    ) -> &'a [tether_core::models::RetrievalHit] {
        let context_len = self.config.max_context_chunks.min(MAX_PROMPT_CHUNKS);
        &retrieval.hits[..retrieval.hits.len().min(context_len)]
    }

    /// Run one generation attempt against the fixed retrieval context.
    ///
    /// `prior_failure` steers a retry toward correction; the retrieval
    /// context is reused as-is, never re-fetched. Upstream failures surface
    /// as `GenerationError` values for the orchestrator to classify.
    pub async fn generate(
        &self,
        query: &Query,
        retrieval: &RetrievalResult,
        attempt_number: u32,
        prior_failure: Option<&str>,
    ) -> TetherResult<GenerationAttempt> {
        let hits = self.context_hits(retrieval);

        let prompt = prompt::build(query, hits, prior_failure);
        debug!(
            attempt_number,
            chunks = hits.len(),
            prompt_chars = prompt.len(),
            provider = self.provider.name(),
            "invoking generation provider"
        );

        let completion = self
            .provider
            .complete(&prompt, self.config.max_tokens, self.config.temperature)
            .await?;

        let candidate_citations = citations::extract(&completion.text, hits);
        debug!(
            truncated = completion.truncated,
            citations = candidate_citations.len(),
            completion_tokens = completion.usage.completion_tokens,
            "generation attempt complete"
        );

        Ok(GenerationAttempt {
            attempt_number,
            raw_text: completion.text,
            truncated: completion.truncated,
            candidate_citations,
        })
    }
}
