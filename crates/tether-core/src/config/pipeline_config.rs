use serde::{Deserialize, Serialize};

use super::defaults;

/// Orchestrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Generation retries after the first attempt. Thresholds never relax
    /// across retries; only regenerated text can pass.
    pub max_retries: u32,
    /// Wall-clock budget for the whole request. Expiry abandons any
    /// outstanding provider call and returns the timeout refusal.
    pub timeout_ms: u64,
    /// Base backoff between upstream-error retries (doubled per attempt).
    pub backoff_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            timeout_ms: defaults::DEFAULT_TIMEOUT_MS,
            backoff_ms: defaults::DEFAULT_BACKOFF_MS,
        }
    }
}
