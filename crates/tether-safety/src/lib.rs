//! # tether-safety
//!
//! The response-safety pipeline: an ordered sequence of validator stages
//! the orchestrator drives explicitly. Security always runs first — nothing
//! reaches the later stages unredacted — then integrity, then the grounding
//! firewall as the terminal, non-negotiable gate.

pub mod grounding;
pub mod integrity;
pub mod security;

use tether_core::traits::IValidatorStage;

pub use grounding::{GroundingFirewall, LexicalOverlap, SupportMetric};
pub use integrity::{IntegrityValidator, MergedWordDetector};
pub use security::SecurityFilter;

/// The standard stage sequence in its fixed execution order.
pub fn standard_stages() -> Vec<Box<dyn IValidatorStage>> {
    vec![
        Box::new(SecurityFilter::new()),
        Box::new(IntegrityValidator::new()),
        Box::new(GroundingFirewall::new()),
    ]
}
