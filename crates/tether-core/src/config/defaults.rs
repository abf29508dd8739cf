//! Named defaults for every configurable knob.

// ── Retrieval ──────────────────────────────────────────────────────────────
pub const DEFAULT_TOP_K: usize = 8;
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_DENSE_WEIGHT: f64 = 1.0;
pub const DEFAULT_SPARSE_WEIGHT: f64 = 1.0;
pub const DEFAULT_DEDUP_OVERLAP: f64 = 0.8;
/// Dense hits below this cosine are discarded before fusion. Reciprocal-rank
/// scores carry no absolute relevance, so without a floor a barely-similar
/// top hit would still earn a confident tier.
pub const DEFAULT_MIN_DENSE_SCORE: f32 = 0.25;
/// Tier thresholds apply to the top fused score after normalization to [0, 1].
pub const DEFAULT_TIER_LOW: f64 = 0.25;
pub const DEFAULT_TIER_MEDIUM: f64 = 0.5;
pub const DEFAULT_TIER_HIGH: f64 = 0.75;

// ── Classifier ─────────────────────────────────────────────────────────────
pub const DEFAULT_MIN_QUERY_CHARS: usize = 4;

// ── Generation ─────────────────────────────────────────────────────────────
pub const DEFAULT_MAX_CONTEXT_CHUNKS: usize = 5;
pub const DEFAULT_MAX_TOKENS: u32 = 512;
pub const DEFAULT_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3.1:8b";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

// ── Safety ─────────────────────────────────────────────────────────────────
pub const DEFAULT_REQUIRE_CITATIONS: bool = true;
pub const DEFAULT_REDACTION_DENSITY_LIMIT: f64 = 0.2;
pub const DEFAULT_GROUNDING_MINIMUM: f64 = 0.7;
pub const DEFAULT_CLAIM_OVERLAP_THRESHOLD: f64 = 0.5;
pub const DEFAULT_MERGED_WORD_MIN_LEN: usize = 20;

// ── Pipeline ───────────────────────────────────────────────────────────────
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_BACKOFF_MS: u64 = 250;
