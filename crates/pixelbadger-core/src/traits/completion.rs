//! Completion provider trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::ChatMessage;

/// Chat completion backend.
#[async_trait]
pub trait CompletionClient: Send + Sync + std::fmt::Debug + 'static {
    /// Model used for completions.
    fn model(&self) -> &str;

    /// Send the conversation and return the text of the first choice.
    async fn complete(&self, messages: Vec<ChatMessage>) -> AppResult<String>;
}
