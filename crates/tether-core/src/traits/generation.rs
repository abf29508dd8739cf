use async_trait::async_trait;

use crate::errors::TetherResult;
use crate::models::Completion;

/// External text-generation provider.
///
/// Failures are classified by `GenerationError`: transient errors are
/// retryable with backoff, policy rejections are not.
#[async_trait]
pub trait IGenerationProvider: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> TetherResult<Completion>;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
