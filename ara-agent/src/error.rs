//! Error types for the `ara-agent` crate.

use ara_rag::RagError;
use thiserror::Error;

/// Errors surfaced by responders and the assistant runtime.
#[derive(Debug, Error)]
pub enum AgentError {
    /// An error propagated from the retrieval core.
    #[error(transparent)]
    Rag(#[from] RagError),

    /// Invalid or unreadable assistant configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A responder was requested before [`AssistantRuntime::initialize`](crate::AssistantRuntime::initialize).
    #[error("Assistant runtime is not initialized")]
    NotInitialized,
}

/// A convenience result type for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;
