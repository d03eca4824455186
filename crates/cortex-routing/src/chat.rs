//! Chat-completion collaborator seam
//!
//! The requirement analyzer issues exactly one outbound LLM call per routing
//! request through this trait. The gateway wires in its provider client;
//! tests wire in canned responses.

use async_trait::async_trait;

use crate::error::ChatError;

/// Trait implemented by the chat-completion backend
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Send one completion request instructing JSON-only output
    ///
    /// Returns the raw text of the model response. Implementations should
    /// request a JSON response format where the provider supports one.
    async fn complete_json(&self, system_prompt: &str, user_prompt: &str) -> Result<String, ChatError>;
}
