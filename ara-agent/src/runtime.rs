//! The process-wide assistant instance.
//!
//! Loading the corpus and embedding it is the expensive part of the system,
//! so it happens once, in [`AssistantRuntime::initialize`]. Request handling
//! never initializes: [`AssistantRuntime::answer`] on an uninitialized runtime
//! returns an `unavailable` response.

use std::sync::Arc;

use ara_rag::{Corpus, EmbeddingProvider, Retriever};
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::classifier::QueryClassifier;
use crate::config::{AgentKind, AssistantConfig};
use crate::error::{AgentError, Result};
use crate::keyword::KeywordResponder;
use crate::responder::Responder;
use crate::response::ResponseData;
use crate::vector::VectorResponder;

/// Owns the configuration and the shared [`Responder`] built once by
/// [`initialize`](Self::initialize).
pub struct AssistantRuntime {
    config: AssistantConfig,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    corpus: Option<Corpus>,
    responder: OnceCell<Arc<dyn Responder>>,
}

impl std::fmt::Debug for AssistantRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantRuntime")
            .field("agent", &self.config.agent)
            .field("knowledge_path", &self.config.knowledge_path)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

impl AssistantRuntime {
    pub fn new(config: AssistantConfig) -> Self {
        Self { config, embedding_provider: None, corpus: None, responder: OnceCell::new() }
    }

    /// Use `provider` instead of the one named by the config's embedding backend.
    pub fn with_embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Use an in-memory corpus instead of reading `knowledge_path`.
    pub fn with_corpus(mut self, corpus: Corpus) -> Self {
        self.corpus = Some(corpus);
        self
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.responder.initialized()
    }

    /// Build the responder if it has not been built yet.
    ///
    /// Concurrent callers wait for the same build; later calls return the
    /// cached instance without touching the corpus or the provider again. A
    /// failed build leaves the runtime uninitialized so it can be retried.
    ///
    /// # Errors
    ///
    /// Returns the configuration, provider or indexing error that stopped the
    /// build. A missing knowledge file is not an error; the assistant starts
    /// with an empty corpus.
    pub async fn initialize(&self) -> Result<Arc<dyn Responder>> {
        self.responder.get_or_try_init(|| self.build_responder()).await.cloned()
    }

    /// The initialized responder.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NotInitialized`] before [`initialize`](Self::initialize)
    /// has succeeded.
    pub fn responder(&self) -> Result<Arc<dyn Responder>> {
        self.responder.get().cloned().ok_or(AgentError::NotInitialized)
    }

    /// Answer `query`, converting every failure into an `unavailable` response.
    pub async fn answer(&self, query: &str) -> ResponseData {
        let responder = match self.responder() {
            Ok(responder) => responder,
            Err(e) => {
                error!(stage = "answer", error = %e, "assistant used before initialization");
                return ResponseData::unavailable();
            }
        };

        match responder.get_response(query).await {
            Ok(response) => response,
            Err(e) => {
                error!(stage = "answer", responder = responder.name(), error = %e, "failed to answer query");
                ResponseData::unavailable()
            }
        }
    }

    async fn build_responder(&self) -> Result<Arc<dyn Responder>> {
        self.config.validate()?;

        let corpus = match &self.corpus {
            Some(corpus) => corpus.clone(),
            None => Corpus::load_or_empty(&self.config.knowledge_path).await,
        };

        let responder: Arc<dyn Responder> = match self.config.agent {
            AgentKind::Keyword => Arc::new(KeywordResponder::new(corpus)),
            AgentKind::Vector => {
                let provider = match &self.embedding_provider {
                    Some(provider) => provider.clone(),
                    None => self.config.embedding.create_provider()?,
                };
                let retriever = Retriever::builder()
                    .config(self.config.rag.clone())
                    .embedding_provider(provider)
                    .corpus(corpus)
                    .build()
                    .await?;
                let classifier =
                    QueryClassifier::new(self.config.keywords.clone(), self.config.rag.similarity_threshold);
                Arc::new(VectorResponder::new(classifier, retriever))
            }
        };

        info!(stage = "initialize", responder = responder.name(), "assistant initialized");
        Ok(responder)
    }
}
