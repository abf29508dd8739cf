use serde::{Deserialize, Serialize};

use super::ConfidenceTier;

/// Why a request was refused. Each kind maps to a distinct user-visible
/// message — refusals are never blended or softened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefusalKind {
    /// Nothing in the corpus supports an answer.
    NoRelevantInformation,
    /// Upstream generation is down or exhausted its retries.
    ServiceUnavailable,
    /// The query was too short or unparseable to act on.
    ClarificationNeeded,
    /// The pipeline wall clock expired.
    Timeout,
}

/// An answer-to-chunk reference surfaced to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    pub chunk_id: String,
    /// Fused retrieval score of the cited chunk within this request.
    pub relevance_score: f64,
}

/// Terminal, immutable per-request outcome returned to the caller.
///
/// Invariant: every citation references a chunk retrieved for this same
/// request — citations are never fabricated or carried across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub answer: String,
    pub confidence: ConfidenceTier,
    pub is_grounded: bool,
    pub is_refusal: bool,
    pub refusal: Option<RefusalKind>,
    pub citations: Vec<Citation>,
    pub processing_time_ms: u64,
}

impl QueryResult {
    /// Build a refusal result carrying the canonical message for `kind`.
    pub fn refusal_result(
        kind: RefusalKind,
        message: impl Into<String>,
        confidence: ConfidenceTier,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            answer: message.into(),
            confidence,
            is_grounded: false,
            is_refusal: true,
            refusal: Some(kind),
            citations: Vec::new(),
            processing_time_ms,
        }
    }
}
