use serde::{Deserialize, Serialize};

use super::defaults;

/// Grounded generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// How many top retrieval hits are injected into the prompt.
    pub max_context_chunks: usize,
    /// Output-length budget handed to the provider.
    pub max_tokens: u32,
    /// Fixed low sampling temperature. Determinism over fluency.
    pub temperature: f32,
    /// OpenAI-compatible chat-completions endpoint.
    pub endpoint: String,
    pub model: String,
    /// Per-request timeout at the HTTP layer, distinct from the
    /// pipeline-wide wall clock.
    pub request_timeout_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_context_chunks: defaults::DEFAULT_MAX_CONTEXT_CHUNKS,
            max_tokens: defaults::DEFAULT_MAX_TOKENS,
            temperature: defaults::DEFAULT_TEMPERATURE,
            endpoint: defaults::DEFAULT_ENDPOINT.to_string(),
            model: defaults::DEFAULT_MODEL.to_string(),
            request_timeout_ms: defaults::DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}
