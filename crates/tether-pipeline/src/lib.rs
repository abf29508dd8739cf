//! # tether-pipeline
//!
//! The per-request state machine:
//! `RETRIEVE → CLASSIFY → (REFUSE | GENERATE) → VALIDATE → (ACCEPT | RETRY | REFUSE)`.
//!
//! Every internal failure is absorbed here — callers only ever see a
//! `QueryResult`, and every refusal carries one of the canonical messages.

pub mod context;
pub mod orchestrator;
pub mod refusal;

pub use orchestrator::Pipeline;
