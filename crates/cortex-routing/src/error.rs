//! Routing-specific error types

use thiserror::Error;

/// Transport or provider failure from the chat-completion collaborator
#[derive(Debug, Error)]
#[error("chat completion failed: {0}")]
pub struct ChatError(pub String);

/// Errors that can occur during model routing
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Requirement extraction failed: transport failure or unparsable
    /// response after all fallbacks were exhausted
    #[error("requirement analysis failed: {0}")]
    Analysis(String),

    /// No catalog entry satisfies a hard filter
    #[error("no candidate model satisfies: {need}")]
    NoCandidates {
        /// What the filter required
        need: String,
    },
}

impl From<ChatError> for RoutingError {
    fn from(err: ChatError) -> Self {
        Self::Analysis(err.to_string())
    }
}
