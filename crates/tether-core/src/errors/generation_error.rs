/// Generation-provider errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Transient upstream failure (timeout, connection reset, 5xx, rate limit).
    #[error("upstream generation failed: {reason}")]
    Upstream { reason: String },

    /// Non-retryable provider rejection (bad request, content policy).
    #[error("provider rejected request: {reason}")]
    Policy { reason: String },

    /// Provider returned a payload the client could not interpret.
    #[error("malformed provider response: {reason}")]
    InvalidResponse { reason: String },
}

impl GenerationError {
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GenerationError::Upstream { .. } | GenerationError::InvalidResponse { .. }
        )
    }
}
