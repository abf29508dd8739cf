//! OpenAI-compatible chat-completions client.
//!
//! Error classification drives the orchestrator's retry policy: transport
//! failures, 429 and 5xx are transient (`Upstream`); other rejections are
//! `Policy` and never retried.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tether_core::config::GenerationConfig;
use tether_core::errors::{GenerationError, TetherResult};
use tether_core::models::{Completion, TokenUsage};
use tether_core::traits::IGenerationProvider;
use tracing::debug;

pub struct HttpProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl HttpProvider {
    pub fn new(config: &GenerationConfig, api_key: Option<String>) -> TetherResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| GenerationError::Upstream {
                reason: format!("http client init failed: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl IGenerationProvider for HttpProvider {
    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> TetherResult<Completion> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
            temperature,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            GenerationError::Upstream {
                reason: format!("request failed: {e}"),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let reason = format!("provider returned {status}");
            return Err(if status.as_u16() == 429 || status.is_server_error() {
                GenerationError::Upstream { reason }.into()
            } else {
                GenerationError::Policy { reason }.into()
            });
        }

        let parsed: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| GenerationError::InvalidResponse {
                    reason: format!("body decode failed: {e}"),
                })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::InvalidResponse {
                reason: "no choices in response".to_string(),
            })?;

        let truncated = choice.finish_reason.as_deref() == Some("length");
        let usage = parsed
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        debug!(truncated, "provider completion received");
        Ok(Completion {
            text: choice.message.content,
            truncated,
            usage,
        })
    }

    fn name(&self) -> &str {
        "http-chat-completions"
    }
}
