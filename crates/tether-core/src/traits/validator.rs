use crate::config::SafetyConfig;
use crate::models::{RetrievalResult, StageReport, ValidationStage};

/// Per-request inputs shared by the validator stages.
///
/// Holds references only — the orchestrator owns the underlying data and
/// no stage mutates state shared with another request.
pub struct ValidationContext<'a> {
    pub retrieval: &'a RetrievalResult,
    /// Chunk ids the current attempt cited.
    pub citations: &'a [String],
    pub config: &'a SafetyConfig,
}

/// One stage of the response-safety pipeline.
///
/// The orchestrator drives the fixed sequence (security → integrity →
/// grounding) explicitly; stages never call each other. A stage that
/// rewrites the text returns the new form in `StageReport::normalized_text`
/// and the orchestrator threads it into the next stage.
pub trait IValidatorStage: Send + Sync {
    fn stage(&self) -> ValidationStage;

    fn evaluate(&self, text: &str, ctx: &ValidationContext<'_>) -> StageReport;
}
