//! Completion model trait.

use async_trait::async_trait;

use crate::error::Result;

/// Single-turn text completion.
///
/// Implementations wrap a specific LLM provider and carry their own
/// model identity and sampling settings; the pipeline treats the model
/// as an opaque prompt-in, text-out service with no conversation state.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Complete a single prompt and return the raw reply text.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Model identifier recorded in run metadata.
    fn model_id(&self) -> &str;
}
