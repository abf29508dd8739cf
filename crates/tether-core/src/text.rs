//! Shared lexical helpers used by the sparse index, deduplication,
//! and the grounding firewall.

/// Tokenize text into lowercase alphanumeric terms (underscores kept,
/// single-character noise dropped).
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|s| s.len() >= 2)
        .map(|s| s.to_lowercase())
        .collect()
}

/// English function words excluded from overlap and ranking computations.
/// A match on one of these says nothing about relevance.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "can", "could", "did", "do", "does", "for",
    "from", "has", "have", "how", "in", "is", "it", "its", "many", "much", "my", "of", "on", "or",
    "our", "should", "that", "the", "their", "then", "there", "these", "they", "this", "to",
    "was", "we", "were", "what", "when", "where", "which", "who", "why", "will", "with", "would",
    "you", "your",
];

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Tokenize and drop stopwords. The unit of lexical-overlap scoring.
pub fn content_tokens(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| !is_stopword(t))
        .collect()
}
