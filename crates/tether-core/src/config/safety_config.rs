use serde::{Deserialize, Serialize};

use super::defaults;

/// Validator-stage configuration shared by security, integrity, and grounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// When set, a non-refusal answer without citation markers fails integrity.
    pub require_citations: bool,
    /// Fraction of the text the security filter may mask before the attempt
    /// is failed outright instead of redacted.
    pub redaction_density_limit: f64,
    /// Minimum fraction of claims that must be supported for an answer
    /// to count as grounded.
    pub grounding_minimum: f64,
    /// Per-claim support threshold for the overlap metric.
    pub claim_overlap_threshold: f64,
    /// Minimum token length before the merged-word detector considers it.
    pub merged_word_min_len: usize,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            require_citations: defaults::DEFAULT_REQUIRE_CITATIONS,
            redaction_density_limit: defaults::DEFAULT_REDACTION_DENSITY_LIMIT,
            grounding_minimum: defaults::DEFAULT_GROUNDING_MINIMUM,
            claim_overlap_threshold: defaults::DEFAULT_CLAIM_OVERLAP_THRESHOLD,
            merged_word_min_len: defaults::DEFAULT_MERGED_WORD_MIN_LEN,
        }
    }
}
