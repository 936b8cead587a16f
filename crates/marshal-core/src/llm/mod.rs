//! Language model invocation.
//!
//! The planner only needs `prompt in, text out`; [`LanguageModel`] is that
//! seam. [`OpenAiClient`] talks to an OpenAI-compatible chat completions
//! endpoint and [`StaticModel`] replays a fixed response.

use async_trait::async_trait;

mod error;
mod openai;
mod static_model;

pub use error::LlmError;
pub use openai::{ModelConfig, OpenAiClient};
pub use static_model::StaticModel;

/// Stateless text completion. Each call is independent and is attempted
/// exactly once.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Sends `prompt` to the model and returns its raw text response.
    async fn invoke(&self, prompt: &str) -> Result<String, LlmError>;
}
