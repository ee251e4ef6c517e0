//! LLM provider implementations.

mod openai;

pub use openai::OpenAiModel;
