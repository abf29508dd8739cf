use serde::{Deserialize, Serialize};

/// Raw provider output before any validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    pub text: String,
    /// Set when the provider hit its output-length budget.
    pub truncated: bool,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// One generation attempt. Owned by a single request and a single retry —
/// attempts never share mutable storage.
#[derive(Debug, Clone)]
pub struct GenerationAttempt {
    /// 1-based attempt counter within the request.
    pub attempt_number: u32,
    pub raw_text: String,
    pub truncated: bool,
    /// Chunk ids recovered from citation markers in the output.
    /// Empty when the output carried no mappable markers.
    pub candidate_citations: Vec<String>,
}
