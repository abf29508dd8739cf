//! Error taxonomy for the pipeline.
//!
//! Every failure is absorbed inside the pipeline: the caller only ever sees
//! a `QueryResult` with `is_refusal` set. These types exist so the stages
//! can communicate failure categories precisely among themselves.

mod config_error;
mod generation_error;
mod retrieval_error;

pub use config_error::ConfigError;
pub use generation_error::GenerationError;
pub use retrieval_error::RetrievalError;

/// Convenience alias used throughout the workspace.
pub type TetherResult<T> = Result<T, TetherError>;

/// Top-level error uniting all subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum TetherError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl TetherError {
    /// Whether a retry with the same inputs could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            TetherError::Generation(e) => e.is_transient(),
            TetherError::Retrieval(_) => false,
            TetherError::Config(_) => false,
        }
    }
}
