//! Immutable per-process configuration.
//!
//! Every section deserializes from a partial TOML document; missing fields
//! fall back to the defaults module. Once constructed the config is never
//! mutated — stages receive shared references.

pub mod defaults;

mod classifier_config;
mod generation_config;
mod pipeline_config;
mod retrieval_config;
mod safety_config;

pub use classifier_config::ClassifierConfig;
pub use generation_config::GenerationConfig;
pub use pipeline_config::PipelineConfig;
pub use retrieval_config::RetrievalConfig;
pub use safety_config::SafetyConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, TetherResult};

/// Top-level configuration for the whole pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TetherConfig {
    pub retrieval: RetrievalConfig,
    pub classifier: ClassifierConfig,
    pub generation: GenerationConfig,
    pub safety: SafetyConfig,
    pub pipeline: PipelineConfig,
}

impl TetherConfig {
    /// Parse a (possibly partial) TOML document, filling the rest with defaults.
    pub fn from_toml(input: &str) -> TetherResult<Self> {
        let config: TetherConfig = toml::from_str(input).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would violate pipeline invariants.
    fn validate(&self) -> TetherResult<()> {
        let r = &self.retrieval;
        if !(r.tier_low < r.tier_medium && r.tier_medium < r.tier_high) {
            return Err(ConfigError::InvalidValue {
                field: "retrieval.tier_*".to_string(),
                reason: "confidence thresholds must be strictly ascending".to_string(),
            }
            .into());
        }
        if !(0.0..=1.0).contains(&self.safety.grounding_minimum) {
            return Err(ConfigError::InvalidValue {
                field: "safety.grounding_minimum".to_string(),
                reason: "must be within [0.0, 1.0]".to_string(),
            }
            .into());
        }
        if !(0.0..=1.0).contains(&self.safety.redaction_density_limit) {
            return Err(ConfigError::InvalidValue {
                field: "safety.redaction_density_limit".to_string(),
                reason: "must be within [0.0, 1.0]".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
