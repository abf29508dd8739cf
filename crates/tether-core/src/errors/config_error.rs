/// Configuration parsing and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {reason}")]
    Parse { reason: String },

    #[error("invalid config value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
