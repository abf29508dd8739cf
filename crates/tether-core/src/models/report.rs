use serde::{Deserialize, Serialize};

/// The three validator stages, in their fixed execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStage {
    Security,
    Integrity,
    Grounding,
}

/// Outcome of one validator stage.
///
/// Reports compose sequentially: a stage that rewrites the text hands the
/// rewritten form to the next stage via `normalized_text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: ValidationStage,
    pub passed: bool,
    /// Failure category for retry steering, e.g. "answer truncated mid-sentence".
    pub reason: Option<String>,
    /// Present when the stage produced a cleaned or redacted form of the text.
    pub normalized_text: Option<String>,
}

impl StageReport {
    pub fn pass(stage: ValidationStage) -> Self {
        Self {
            stage,
            passed: true,
            reason: None,
            normalized_text: None,
        }
    }

    pub fn pass_with_text(stage: ValidationStage, text: impl Into<String>) -> Self {
        Self {
            stage,
            passed: true,
            reason: None,
            normalized_text: Some(text.into()),
        }
    }

    pub fn fail(stage: ValidationStage, reason: impl Into<String>) -> Self {
        Self {
            stage,
            passed: false,
            reason: Some(reason.into()),
            normalized_text: None,
        }
    }
}
