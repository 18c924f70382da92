//! # ara-rag
//!
//! Retrieval core for the ARA research assistant.
//!
//! ## Overview
//!
//! - [`Corpus`]: a knowledge text split on `.` into dense, immutable [`Fact`]s
//! - [`EmbeddingProvider`]: text → fixed-length vector; [`HashEmbeddingProvider`]
//!   works offline, `OpenAIEmbeddingProvider` (feature `openai`) calls an API
//! - [`FlatL2Index`]: exact k-nearest-neighbor search by L2 distance
//! - [`Retriever`]: embeds the corpus once, then answers `retrieve(query)`
//! - [`assemble_context`] / [`Generator`]: the text block handed to the
//!   generation stage and the stage itself
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ara_rag::{Corpus, HashEmbeddingProvider, Retriever};
//!
//! let corpus = Corpus::load_or_empty("knowledge_base.txt").await;
//! let retriever = Retriever::builder()
//!     .embedding_provider(Arc::new(HashEmbeddingProvider::default()))
//!     .corpus(corpus)
//!     .build()
//!     .await?;
//! let facts = retriever.retrieve("What are the moons of Mars?").await?;
//! ```

pub mod config;
pub mod context;
pub mod corpus;
pub mod document;
pub mod embedding;
pub mod error;
pub mod hashing;
pub mod index;
pub mod retrieval;

#[cfg(feature = "openai")]
pub mod openai;

pub use config::{DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K, RagConfig, RagConfigBuilder};
pub use context::{Generator, PlaceholderGenerator, assemble_context};
pub use corpus::{Corpus, split_facts};
pub use document::{Embedding, Fact, FactId, Neighbor, ScoredFact};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use hashing::HashEmbeddingProvider;
pub use index::{DistanceMetric, FlatL2Index};
pub use retrieval::{Retriever, RetrieverBuilder};

#[cfg(feature = "openai")]
pub use openai::OpenAIEmbeddingProvider;
