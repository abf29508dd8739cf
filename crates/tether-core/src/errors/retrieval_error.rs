/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("index unavailable: {reason}")]
    IndexUnavailable { reason: String },

    #[error("query embedding failed: {reason}")]
    EmbeddingFailed { reason: String },
}
