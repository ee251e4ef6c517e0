//! OpenAI implementation of the completion model trait.
//!
//! Goes straight through the chat-completions REST endpoint; a single
//! user message per call, no conversation state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::security::SecretString;
use crate::traits::CompletionModel;

/// OpenAI-backed completion model.
///
/// Defaults to `gpt-4o-mini` with temperature 0.0 so runs are as
/// deterministic as the provider allows.
pub struct OpenAiModel {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
    temperature: f32,
    base_url: String,
}

impl OpenAiModel {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: SecretString::new(api_key),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| PipelineError::Config("OPENAI_API_KEY is not set".to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature (default: 0.0).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionModel for OpenAiModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Model(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Model(Box::new(std::io::Error::other(
                format!("OpenAI API error: {status}"),
            ))));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Model(Box::new(e)))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                PipelineError::Model(Box::new(std::io::Error::other(
                    "OpenAI reply contained no choices",
                )))
            })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let model = OpenAiModel::new("sk-test")
            .with_model("gpt-4o")
            .with_temperature(0.7)
            .with_base_url("https://proxy.local/v1");

        assert_eq!(model.model_id(), "gpt-4o");
        assert_eq!(model.base_url, "https://proxy.local/v1");
        assert_eq!(model.temperature, 0.7);
    }

    #[test]
    fn test_api_key_not_in_debug_output() {
        let model = OpenAiModel::new("sk-very-secret");
        assert_eq!(format!("{:?}", model.api_key), "[REDACTED]");
    }
}
