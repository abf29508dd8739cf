use serde::{Deserialize, Serialize};

/// Classification tag assigned by the query classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryClass {
    Greeting,
    Thanks,
    OffTopic,
    Domain,
    Ambiguous,
}

/// A single incoming question. Created per request, discarded after response.
#[derive(Debug, Clone)]
pub struct Query {
    pub raw: String,
    /// Lowercased, whitespace-collapsed form used by pattern matching
    /// and lexical search.
    pub normalized: String,
    pub class: Option<QueryClass>,
}

impl Query {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize(&raw);
        Self {
            raw,
            normalized,
            class: None,
        }
    }
}

/// Lowercase and collapse all whitespace runs to single spaces.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_collapses_whitespace_and_case() {
        let q = Query::new("  How   Do\tDeploys WORK? ");
        assert_eq!(q.normalized, "how do deploys work?");
        assert_eq!(q.raw, "  How   Do\tDeploys WORK? ");
    }

    #[test]
    fn empty_query_normalizes_to_empty() {
        assert_eq!(Query::new("   ").normalized, "");
    }
}
