//! Retrieval over a fact corpus.
//!
//! The [`Retriever`] owns the finalized [`Corpus`], the shared
//! [`EmbeddingProvider`] and the optional [`FlatL2Index`]. It is built once
//! (embedding every fact in a single batch) and is read-only afterwards.
//!
//! # Example
//!
//! ```rust,ignore
//! use ara_rag::{Corpus, HashEmbeddingProvider, RagConfig, Retriever};
//!
//! let retriever = Retriever::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(HashEmbeddingProvider::default()))
//!     .corpus(Corpus::from_text("Mars is red. Phobos is a moon."))
//!     .build()
//!     .await?;
//!
//! let facts = retriever.retrieve("moons of Mars").await?;
//! ```

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::RagConfig;
use crate::corpus::Corpus;
use crate::document::{Embedding, Neighbor, ScoredFact};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::index::FlatL2Index;

/// Nearest-fact retrieval over an immutable corpus.
pub struct Retriever {
    config: RagConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    corpus: Corpus,
    index: Option<FlatL2Index>,
}

impl std::fmt::Debug for Retriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retriever")
            .field("config", &self.config)
            .field("provider", &self.embedding_provider.name())
            .field("fact_count", &self.corpus.len())
            .field("indexed", &self.index.is_some())
            .finish()
    }
}

impl Retriever {
    /// Create a new [`RetrieverBuilder`].
    pub fn builder() -> RetrieverBuilder {
        RetrieverBuilder::default()
    }

    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedding_provider
    }

    /// The vector index, absent when the corpus is empty.
    pub fn index(&self) -> Option<&FlatL2Index> {
        self.index.as_ref()
    }

    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    /// Search the index with an already-embedded query.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::IndexNotReady`] when there is no index, and
    /// [`RagError::DimensionMismatch`] for a vector of the wrong length.
    pub fn search_vector(&self, query_vector: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        let index = self.index.as_ref().ok_or(RagError::IndexNotReady)?;
        index.search(query_vector, k)
    }

    /// Embed `query` and return its `k` nearest neighbors.
    ///
    /// The query is not embedded when there is no index.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::IndexNotReady`] when there is no index, or the
    /// provider's [`RagError::EmbeddingError`].
    pub async fn nearest(&self, query: &str, k: usize) -> Result<Vec<Neighbor>> {
        if self.index.is_none() {
            return Err(RagError::IndexNotReady);
        }
        let query_vector = self.embedding_provider.embed(query).await.map_err(|e| {
            error!(stage = "embed_query", error = %e, "embedding failed during query");
            e
        })?;
        self.search_vector(&query_vector, k)
    }

    /// Retrieve the configured `top_k` nearest fact texts, nearest first.
    ///
    /// # Errors
    ///
    /// Only provider failures surface; a missing index yields an empty result.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<String>> {
        self.retrieve_with_k(query, self.config.top_k).await
    }

    /// Retrieve the `k` nearest fact texts, nearest first.
    ///
    /// # Errors
    ///
    /// See [`Retriever::retrieve`].
    pub async fn retrieve_with_k(&self, query: &str, k: usize) -> Result<Vec<String>> {
        let scored = self.retrieve_scored(query, k).await?;
        Ok(scored.into_iter().map(|s| s.fact.text).collect())
    }

    /// Retrieve the `k` nearest facts together with their distances.
    ///
    /// # Errors
    ///
    /// See [`Retriever::retrieve`].
    pub async fn retrieve_scored(&self, query: &str, k: usize) -> Result<Vec<ScoredFact>> {
        let neighbors = match self.nearest(query, k).await {
            Ok(neighbors) => neighbors,
            Err(e) if e.is_not_ready() => {
                debug!(stage = "retrieve", "no index, returning no facts");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let scored: Vec<ScoredFact> = neighbors
            .into_iter()
            .filter_map(|n| {
                self.corpus.get(n.fact_id).map(|fact| ScoredFact { fact: fact.clone(), distance: n.distance })
            })
            .collect();

        info!(
            stage = "retrieve",
            query_len = query.len(),
            k,
            result_count = scored.len(),
            "retrieved facts"
        );
        Ok(scored)
    }
}

/// Builder for constructing a [`Retriever`].
///
/// `embedding_provider` is required; `config` defaults to
/// [`RagConfig::default`] and `corpus` to an empty corpus.
#[derive(Default)]
pub struct RetrieverBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    corpus: Option<Corpus>,
}

impl RetrieverBuilder {
    /// Set the retrieval configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the corpus to index.
    pub fn corpus(mut self, corpus: Corpus) -> Self {
        self.corpus = Some(corpus);
        self
    }

    /// Embed every fact in one batch and build the index.
    ///
    /// An empty corpus skips embedding and produces a retriever without an
    /// index.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if the provider is missing or the
    /// configuration is invalid, [`RagError::EmbeddingError`] if the provider
    /// fails or returns the wrong number of vectors, and
    /// [`RagError::DimensionMismatch`] for inconsistent vectors.
    pub async fn build(self) -> Result<Retriever> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::ConfigError("embedding_provider is required".to_string()))?;
        let corpus = self.corpus.unwrap_or_default();

        if corpus.is_empty() {
            info!(stage = "index", fact_count = 0, "empty corpus, no vector index built");
            return Ok(Retriever { config, embedding_provider, corpus, index: None });
        }

        let texts = corpus.texts();
        let vectors = embedding_provider.embed_batch(&texts).await.map_err(|e| {
            error!(stage = "index", provider = embedding_provider.name(), error = %e, "embedding failed while indexing");
            e
        })?;
        if vectors.len() != corpus.len() {
            return Err(RagError::EmbeddingError {
                provider: embedding_provider.name().to_string(),
                message: format!("expected {} vectors, got {}", corpus.len(), vectors.len()),
            });
        }

        let embeddings: Vec<Embedding> = corpus
            .facts()
            .iter()
            .zip(vectors)
            .map(|(fact, vector)| Embedding { fact_id: fact.id, vector })
            .collect();
        let index = FlatL2Index::build(embeddings, config.metric)?;

        info!(
            stage = "index",
            fact_count = corpus.len(),
            dimensions = index.as_ref().map(FlatL2Index::dimensions).unwrap_or_default(),
            "vector index built"
        );

        Ok(Retriever { config, embedding_provider, corpus, index })
    }
}
