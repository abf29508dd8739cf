//! Merged-word detector: anomalously long tokens whose internal case
//! transitions look like lost spacing ("theCanaryStageReceives").
//!
//! A pluggable strategy object so the rule can be tuned or replaced
//! independently of the integrity stage.

/// A suspicious token.
#[derive(Debug, Clone)]
pub struct MergedWordFinding {
    pub token: String,
    /// Count of lowercase→uppercase transitions inside the token.
    pub transitions: usize,
}

pub struct MergedWordDetector {
    min_len: usize,
}

impl MergedWordDetector {
    pub fn new(min_len: usize) -> Self {
        Self { min_len }
    }

    pub fn detect(&self, text: &str) -> Vec<MergedWordFinding> {
        text.split_whitespace()
            .filter_map(|raw| {
                let token: String = raw
                    .chars()
                    .filter(|c| c.is_alphabetic())
                    .collect();
                if token.chars().count() < self.min_len {
                    return None;
                }
                let transitions = case_transitions(&token);
                // One transition is ordinary camel case or a proper noun
                // boundary; repeated transitions in a long token are not.
                (transitions >= 2).then(|| MergedWordFinding { token, transitions })
            })
            .collect()
    }
}

fn case_transitions(token: &str) -> usize {
    token
        .chars()
        .zip(token.chars().skip(1))
        .filter(|(a, b)| a.is_lowercase() && b.is_uppercase())
        .count()
}
