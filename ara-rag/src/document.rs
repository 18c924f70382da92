//! Data types for facts, embeddings, and search results.

use serde::{Deserialize, Serialize};

/// Position of a fact in its corpus. Dense from `0` to `N - 1`.
pub type FactId = usize;

/// One indexable unit of knowledge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fact {
    /// Zero-based position in the corpus; never changes after load.
    pub id: FactId,
    /// Trimmed sentence text, never empty.
    pub text: String,
}

/// The vector representation of a [`Fact`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embedding {
    /// The fact this vector was computed from.
    pub fact_id: FactId,
    /// The embedding values.
    pub vector: Vec<f32>,
}

/// A fact id paired with its distance to a query vector (lower is closer).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Neighbor {
    /// The matched fact.
    pub fact_id: FactId,
    /// Distance under the index's [`DistanceMetric`](crate::DistanceMetric).
    pub distance: f32,
}

/// A retrieved [`Fact`] paired with its distance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredFact {
    /// The retrieved fact.
    pub fact: Fact,
    /// Distance to the query (lower is more relevant).
    pub distance: f32,
}
