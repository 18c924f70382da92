//! Error types for the `ara-rag` crate.

use thiserror::Error;

/// Errors that can occur while loading, embedding, indexing or retrieving facts.
#[derive(Debug, Error)]
pub enum RagError {
    /// The knowledge source is absent or unreadable.
    #[error("Knowledge source missing ({path}): {message}")]
    SourceMissing {
        /// The path that was requested.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// A search was attempted while no vector index exists.
    #[error("Vector index not ready: the corpus is empty or the index was never built")]
    IndexNotReady,

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A vector did not have the dimensionality the index was built with.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensionality of the index.
        expected: usize,
        /// Dimensionality of the offending vector.
        actual: usize,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl RagError {
    /// Whether this error only means "nothing to search yet".
    ///
    /// Callers on the query path turn these into empty results.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, RagError::IndexNotReady)
    }
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
