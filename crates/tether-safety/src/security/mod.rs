//! Credential redaction filter — always the first validator stage.
//!
//! Detected spans are replaced with a fixed mask token. When masking would
//! consume too much of the text to leave a coherent answer, the attempt is
//! failed instead so the orchestrator regenerates rather than returning
//! heavily-masked output.

pub mod patterns;

use tether_core::constants::MASK_TOKEN;
use tether_core::models::{StageReport, ValidationStage};
use tether_core::traits::{IValidatorStage, ValidationContext};
use tracing::{debug, warn};

use patterns::CredentialMatch;

/// Result of a credential scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub contains_credentials: bool,
    pub redacted_text: String,
    /// Distinct categories hit, in span order.
    pub categories: Vec<String>,
    /// Fraction of the original text covered by credential spans.
    pub redaction_density: f64,
}

pub struct SecurityFilter;

impl SecurityFilter {
    pub fn new() -> Self {
        Self
    }

    /// Scan and redact. Pure computation; the density policy is applied by
    /// the stage wrapper, not here.
    pub fn scan(&self, text: &str) -> ScanOutcome {
        let matches = patterns::scan_all(text);
        if matches.is_empty() {
            return ScanOutcome {
                contains_credentials: false,
                redacted_text: text.to_string(),
                categories: Vec::new(),
                redaction_density: 0.0,
            };
        }

        let covered: usize = matches.iter().map(|m| m.end - m.start).sum();
        let density = if text.is_empty() {
            0.0
        } else {
            covered as f64 / text.len() as f64
        };

        let mut categories: Vec<String> = Vec::new();
        for m in &matches {
            if !categories.iter().any(|c| c == m.category) {
                categories.push(m.category.to_string());
            }
        }

        ScanOutcome {
            contains_credentials: true,
            redacted_text: apply_mask(text, &matches),
            categories,
            redaction_density: density,
        }
    }
}

impl Default for SecurityFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl IValidatorStage for SecurityFilter {
    fn stage(&self) -> ValidationStage {
        ValidationStage::Security
    }

    fn evaluate(&self, text: &str, ctx: &ValidationContext<'_>) -> StageReport {
        let outcome = self.scan(text);
        if !outcome.contains_credentials {
            return StageReport::pass(ValidationStage::Security);
        }

        if outcome.redaction_density > ctx.config.redaction_density_limit {
            warn!(
                density = outcome.redaction_density,
                limit = ctx.config.redaction_density_limit,
                categories = ?outcome.categories,
                "redaction would destroy coherence; failing attempt"
            );
            return StageReport::fail(
                ValidationStage::Security,
                "response contained credential-shaped content",
            );
        }

        debug!(
            density = outcome.redaction_density,
            categories = ?outcome.categories,
            "credentials redacted"
        );
        StageReport::pass_with_text(ValidationStage::Security, outcome.redacted_text)
    }
}

/// Replace spans back-to-front so earlier offsets stay valid.
fn apply_mask(text: &str, matches: &[CredentialMatch]) -> String {
    let mut result = text.to_string();
    for m in matches.iter().rev() {
        if m.end <= result.len() {
            result.replace_range(m.start..m.end, MASK_TOKEN);
        }
    }
    result
}
