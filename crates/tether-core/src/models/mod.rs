//! Data model shared across pipeline stages.

mod attempt;
mod chunk;
mod query;
mod query_result;
mod report;
mod retrieval;

pub use attempt::{Completion, GenerationAttempt, TokenUsage};
pub use chunk::{Chunk, ChunkMetadata};
pub use query::{Query, QueryClass};
pub use query_result::{Citation, QueryResult, RefusalKind};
pub use report::{StageReport, ValidationStage};
pub use retrieval::{ConfidenceTier, RetrievalHit, RetrievalResult};
