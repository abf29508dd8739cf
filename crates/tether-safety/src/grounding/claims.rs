//! Claim decomposition at sentence granularity.

use std::sync::LazyLock;

use regex::Regex;

static CITATION_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\[\d{1,3}\]").expect("marker regex is valid"));

/// Split an answer into claim units.
///
/// Sentence granularity: segments end at terminal punctuation. Citation
/// markers are stripped so they don't count toward overlap, and segments
/// without any word content are dropped.
pub fn split_claims(text: &str) -> Vec<String> {
    let stripped = CITATION_MARKER_RE.replace_all(text, "");

    stripped
        .split_inclusive(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.chars().any(char::is_alphabetic))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_punctuation() {
        let claims = split_claims("First claim [1]. Second claim [2]!");
        assert_eq!(claims, vec!["First claim.", "Second claim!"]);
    }

    #[test]
    fn markers_are_stripped_from_claims() {
        let claims = split_claims("Traffic shifts to the canary [1].");
        assert_eq!(claims, vec!["Traffic shifts to the canary."]);
    }

    #[test]
    fn wordless_segments_dropped() {
        assert!(split_claims("[1]. ... !?").is_empty());
    }

    #[test]
    fn unterminated_tail_still_counts_as_a_claim() {
        let claims = split_claims("Complete sentence. trailing fragment");
        assert_eq!(claims.len(), 2);
    }
}
