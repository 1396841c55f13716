//! Claude API integration for the daily briefing.
//!
//! Non-streaming calls to the Anthropic Messages API. The briefing route only
//! sees the [`TextGenerator`] trait, so a disabled or failing generator can be
//! swapped in for tests.

mod client;
mod error;
mod types;

use async_trait::async_trait;

pub use client::ClaudeClient;
pub use error::{ApiError, ApiErrorResponse, ClaudeError};
pub use types::{ChatRequest, ChatResponse, ContentBlock, Message};

/// Something that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete `prompt` and return the generated text.
    async fn generate(&self, prompt: &str) -> Result<String, ClaudeError>;
}
