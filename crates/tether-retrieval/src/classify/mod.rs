//! Pattern-based query classifier.
//!
//! Stage 1 (no retrieval cost): greeting/thanks phrase match.
//! Stage 2: domain-keyword presence OR retrieval confidence ≥ low,
//!          otherwise off-topic.
//! Stage 3: very short or punctuation-only queries are ambiguous and get a
//!          clarification request instead of a generation attempt.
//!
//! Only `Domain` proceeds to the generator; every other class short-circuits
//! before any generation cost is paid.

mod phrases;

use tether_core::config::ClassifierConfig;
use tether_core::models::{ConfidenceTier, Query, QueryClass, RetrievalResult};
use tether_core::text;
use tracing::debug;

pub struct QueryClassifier {
    config: ClassifierConfig,
    /// Lowercased keyword set, fixed at construction.
    keywords: Vec<String>,
}

impl QueryClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        let keywords = config
            .domain_keywords
            .iter()
            .map(|k| k.to_lowercase())
            .collect();
        Self { config, keywords }
    }

    /// Classifications decidable before any index access.
    ///
    /// Returns `None` when the query needs retrieval evidence to classify.
    pub fn precheck(&self, query: &Query) -> Option<QueryClass> {
        let normalized = &query.normalized;

        if phrases::is_greeting(normalized) {
            return Some(QueryClass::Greeting);
        }
        if phrases::is_thanks(normalized) {
            return Some(QueryClass::Thanks);
        }

        let has_alphanumeric = normalized.chars().any(|c| c.is_alphanumeric());
        if normalized.len() < self.config.min_query_chars || !has_alphanumeric {
            return Some(QueryClass::Ambiguous);
        }

        None
    }

    /// Full classification once retrieval evidence is available.
    pub fn classify(&self, query: &Query, retrieval: &RetrievalResult) -> QueryClass {
        if let Some(class) = self.precheck(query) {
            return class;
        }

        let has_keyword = self.contains_domain_keyword(&query.normalized);
        let confident = retrieval.confidence >= ConfidenceTier::Low;

        let class = if has_keyword || confident {
            QueryClass::Domain
        } else {
            QueryClass::OffTopic
        };
        debug!(?class, has_keyword, confident, "classified query");
        class
    }

    fn contains_domain_keyword(&self, normalized: &str) -> bool {
        if self.keywords.is_empty() {
            return false;
        }
        let tokens = text::tokenize(normalized);
        self.keywords.iter().any(|k| {
            if k.contains(' ') {
                normalized.contains(k.as_str())
            } else {
                tokens.iter().any(|t| t == k)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::config::ClassifierConfig;

    fn classifier(keywords: &[&str]) -> QueryClassifier {
        QueryClassifier::new(ClassifierConfig {
            domain_keywords: keywords.iter().map(|s| s.to_string()).collect(),
            ..ClassifierConfig::default()
        })
    }

    #[test]
    fn greeting_decided_without_retrieval() {
        let c = classifier(&[]);
        let q = Query::new("Hello!");
        assert_eq!(c.precheck(&q), Some(QueryClass::Greeting));
    }

    #[test]
    fn punctuation_only_is_ambiguous() {
        let c = classifier(&[]);
        assert_eq!(c.precheck(&Query::new("???")), Some(QueryClass::Ambiguous));
        assert_eq!(c.precheck(&Query::new("ok")), Some(QueryClass::Ambiguous));
    }

    #[test]
    fn keyword_presence_marks_domain_even_at_none_confidence() {
        let c = classifier(&["canary"]);
        let q = Query::new("why did the canary stage stall");
        let r = RetrievalResult::unavailable();
        assert_eq!(c.classify(&q, &r), QueryClass::Domain);
    }

    #[test]
    fn no_keyword_and_none_confidence_is_off_topic() {
        let c = classifier(&["canary"]);
        let q = Query::new("what's the weather today");
        let r = RetrievalResult::unavailable();
        assert_eq!(c.classify(&q, &r), QueryClass::OffTopic);
    }

    #[test]
    fn multiword_keyword_matches_as_phrase() {
        let c = classifier(&["blue green"]);
        let q = Query::new("is blue green switching supported");
        let r = RetrievalResult::unavailable();
        assert_eq!(c.classify(&q, &r), QueryClass::Domain);
    }
}
