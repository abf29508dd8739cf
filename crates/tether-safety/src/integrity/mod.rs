//! Text-integrity validation: canonicalize, repair truncation, detect
//! merged words, enforce citation presence.

mod completeness;
mod merged_words;
mod normalize;

use std::sync::LazyLock;

use regex::Regex;
use tether_core::config::defaults::DEFAULT_MERGED_WORD_MIN_LEN;
use tether_core::models::{StageReport, ValidationStage};
use tether_core::traits::{IValidatorStage, ValidationContext};
use tracing::debug;

pub use merged_words::{MergedWordDetector, MergedWordFinding};
pub use normalize::normalize;

static CITATION_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d{1,3}\]").expect("marker regex is valid"));

/// Outcome of integrity validation.
#[derive(Debug, Clone)]
pub struct IntegrityOutcome {
    pub is_complete: bool,
    /// Canonicalized (and possibly truncation-trimmed) text.
    pub normalized_text: String,
    pub has_citation_markers: bool,
    /// Populated when completeness failed.
    pub failure: Option<String>,
}

pub struct IntegrityValidator {
    detector: MergedWordDetector,
}

impl IntegrityValidator {
    pub fn new() -> Self {
        Self {
            detector: MergedWordDetector::new(DEFAULT_MERGED_WORD_MIN_LEN),
        }
    }

    pub fn with_detector(detector: MergedWordDetector) -> Self {
        Self { detector }
    }

    /// Validate and repair a candidate answer.
    ///
    /// Normalization always happens first so the completeness and
    /// merged-word heuristics see clean text. Truncated output is softly
    /// recovered by trimming to the last sentence boundary; when no
    /// boundary exists the text is irrecoverable.
    pub fn validate(&self, text: &str) -> IntegrityOutcome {
        let normalized = normalize(text);

        if normalized.is_empty() {
            return IntegrityOutcome {
                is_complete: false,
                normalized_text: normalized,
                has_citation_markers: false,
                failure: Some("empty answer".to_string()),
            };
        }

        let (recovered, complete) = if completeness::ends_complete(&normalized) {
            (normalized, true)
        } else {
            match completeness::trim_to_terminal(&normalized) {
                Some(trimmed) => {
                    debug!(
                        dropped = normalized.len() - trimmed.len(),
                        "trimmed incomplete tail"
                    );
                    (trimmed, true)
                }
                None => (normalized, false),
            }
        };

        if !complete {
            return IntegrityOutcome {
                is_complete: false,
                has_citation_markers: CITATION_MARKER_RE.is_match(&recovered),
                normalized_text: recovered,
                failure: Some("answer truncated with no complete sentence".to_string()),
            };
        }

        let merged = self.detector.detect(&recovered);
        if !merged.is_empty() {
            return IntegrityOutcome {
                is_complete: false,
                has_citation_markers: CITATION_MARKER_RE.is_match(&recovered),
                normalized_text: recovered,
                failure: Some(format!(
                    "answer contains merged words (e.g. \"{}\")",
                    merged[0].token
                )),
            };
        }

        IntegrityOutcome {
            is_complete: true,
            has_citation_markers: CITATION_MARKER_RE.is_match(&recovered),
            normalized_text: recovered,
            failure: None,
        }
    }
}

impl Default for IntegrityValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl IValidatorStage for IntegrityValidator {
    fn stage(&self) -> ValidationStage {
        ValidationStage::Integrity
    }

    fn evaluate(&self, text: &str, ctx: &ValidationContext<'_>) -> StageReport {
        let outcome = self.validate(text);

        if let Some(reason) = outcome.failure {
            return StageReport::fail(ValidationStage::Integrity, reason);
        }
        if ctx.config.require_citations && !outcome.has_citation_markers {
            return StageReport::fail(
                ValidationStage::Integrity,
                "answer carries no citation markers",
            );
        }
        StageReport::pass_with_text(ValidationStage::Integrity, outcome.normalized_text)
    }
}
