use serde::{Deserialize, Serialize};

use super::defaults;

/// Query classifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Keywords whose presence marks a query as in-domain even when
    /// retrieval confidence is below `low`.
    pub domain_keywords: Vec<String>,
    /// Queries shorter than this (after normalization) are ambiguous.
    pub min_query_chars: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            domain_keywords: Vec::new(),
            min_query_chars: defaults::DEFAULT_MIN_QUERY_CHARS,
        }
    }
}
