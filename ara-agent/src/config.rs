//! Assistant configuration.
//!
//! [`AssistantConfig`] is plain serde data so it can come from a YAML file,
//! from code through [`AssistantConfigBuilder`], or from both with CLI flags
//! layered on top.
//!
//! ```yaml
//! agent: vector
//! knowledge_path: knowledge_base.txt
//! rag:
//!   top_k: 3
//!   similarity_threshold: 0.8
//!   metric: euclidean
//! embedding:
//!   provider: hash
//!   dimensions: 256
//! keywords:
//!   topic: [mars, phobos, deimos]
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use ara_rag::hashing::DEFAULT_HASH_DIMENSIONS;
use ara_rag::{EmbeddingProvider, HashEmbeddingProvider, RagConfig};
use serde::{Deserialize, Serialize};

use crate::classifier::KeywordSets;
use crate::error::{AgentError, Result};

/// Default location of the knowledge file.
pub const DEFAULT_KNOWLEDGE_PATH: &str = "knowledge_base.txt";

/// Which [`Responder`](crate::Responder) the runtime builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Classifier plus vector retrieval.
    #[default]
    Vector,
    /// Keyword matching only, no embeddings.
    Keyword,
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::Vector => f.write_str("vector"),
            AgentKind::Keyword => f.write_str("keyword"),
        }
    }
}

impl FromStr for AgentKind {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vector" => Ok(AgentKind::Vector),
            "keyword" | "basic" => Ok(AgentKind::Keyword),
            other => Err(AgentError::ConfigError(format!(
                "unknown agent kind '{other}', expected 'vector' or 'keyword'"
            ))),
        }
    }
}

/// The embedding provider to construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum EmbeddingBackend {
    /// Local feature hashing; needs no network.
    Hash {
        #[serde(default = "default_hash_dimensions")]
        dimensions: usize,
    },
    /// An OpenAI-compatible embeddings API. Requires the `openai` feature
    /// and `OPENAI_API_KEY`.
    #[serde(rename = "openai")]
    OpenAI {
        #[serde(default)]
        model: Option<String>,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        dimensions: Option<usize>,
    },
}

fn default_hash_dimensions() -> usize {
    DEFAULT_HASH_DIMENSIONS
}

impl Default for EmbeddingBackend {
    fn default() -> Self {
        EmbeddingBackend::Hash { dimensions: DEFAULT_HASH_DIMENSIONS }
    }
}

impl EmbeddingBackend {
    /// Construct the provider.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ConfigError`] for the OpenAI backend when the
    /// crate was built without the `openai` feature, and the provider's own
    /// error when it cannot be created (for example a missing API key).
    pub fn create_provider(&self) -> Result<Arc<dyn EmbeddingProvider>> {
        match self {
            EmbeddingBackend::Hash { dimensions } => Ok(Arc::new(HashEmbeddingProvider::new(*dimensions))),
            #[cfg(feature = "openai")]
            EmbeddingBackend::OpenAI { model, base_url, dimensions } => {
                let mut provider = ara_rag::OpenAIEmbeddingProvider::from_env()?;
                if let Some(model) = model {
                    provider = provider.with_model(model.clone());
                }
                if let Some(base_url) = base_url {
                    provider = provider.with_base_url(base_url.clone());
                }
                if let Some(dimensions) = dimensions {
                    provider = provider.with_dimensions(*dimensions);
                }
                Ok(Arc::new(provider))
            }
            #[cfg(not(feature = "openai"))]
            EmbeddingBackend::OpenAI { .. } => Err(AgentError::ConfigError(
                "the openai embedding backend requires the `openai` feature".to_string(),
            )),
        }
    }
}

/// Everything needed to build an assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub agent: AgentKind,
    pub knowledge_path: PathBuf,
    pub keywords: KeywordSets,
    pub rag: RagConfig,
    pub embedding: EmbeddingBackend,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            agent: AgentKind::default(),
            knowledge_path: PathBuf::from(DEFAULT_KNOWLEDGE_PATH),
            keywords: KeywordSets::default(),
            rag: RagConfig::default(),
            embedding: EmbeddingBackend::default(),
        }
    }
}

impl AssistantConfig {
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder::default()
    }

    /// Parse and validate a YAML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ConfigError`] on malformed YAML or invalid values.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| AgentError::ConfigError(format!("invalid config YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ConfigError`] if the file cannot be read or
    /// does not parse.
    pub async fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AgentError::ConfigError(format!("failed to read {}: {e}", path.display())))?;
        Self::from_yaml_str(&yaml)
    }

    /// Check that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ConfigError`] if:
    /// - the retrieval parameters are invalid
    /// - `knowledge_path` is empty
    /// - a keyword is blank
    /// - the hash backend has zero dimensions
    pub fn validate(&self) -> Result<()> {
        self.rag.validate()?;

        if self.knowledge_path.as_os_str().is_empty() {
            return Err(AgentError::ConfigError("knowledge_path must not be empty".to_string()));
        }

        for (set, words) in [
            ("meta", &self.keywords.meta),
            ("greeting", &self.keywords.greeting),
            ("topic", &self.keywords.topic),
        ] {
            if words.iter().any(|w| w.trim().is_empty()) {
                return Err(AgentError::ConfigError(format!("{set} keywords must not be blank")));
            }
        }

        if let EmbeddingBackend::Hash { dimensions: 0 } = self.embedding {
            return Err(AgentError::ConfigError("hash embedding dimensions must be greater than zero".to_string()));
        }
        Ok(())
    }
}

/// Builder for a validated [`AssistantConfig`].
#[derive(Debug, Clone, Default)]
pub struct AssistantConfigBuilder {
    config: AssistantConfig,
}

impl AssistantConfigBuilder {
    pub fn agent(mut self, agent: AgentKind) -> Self {
        self.config.agent = agent;
        self
    }

    pub fn knowledge_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.knowledge_path = path.into();
        self
    }

    pub fn keywords(mut self, keywords: KeywordSets) -> Self {
        self.config.keywords = keywords;
        self
    }

    pub fn rag(mut self, rag: RagConfig) -> Self {
        self.config.rag = rag;
        self
    }

    pub fn similarity_threshold(mut self, threshold: f32) -> Self {
        self.config.rag.similarity_threshold = threshold;
        self
    }

    pub fn top_k(mut self, k: usize) -> Self {
        self.config.rag.top_k = k;
        self
    }

    pub fn embedding(mut self, embedding: EmbeddingBackend) -> Self {
        self.config.embedding = embedding;
        self
    }

    /// # Errors
    ///
    /// See [`AssistantConfig::validate`].
    pub fn build(self) -> Result<AssistantConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
