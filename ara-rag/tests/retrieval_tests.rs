//! Integration tests for the retriever over small fixed corpora.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ara_rag::{
    Corpus, EmbeddingProvider, HashEmbeddingProvider, RagConfig, RagError, Result, Retriever,
};
use async_trait::async_trait;

/// Maps known texts to fixed vectors; anything else embeds to the origin.
struct FixtureProvider {
    vectors: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
}

impl FixtureProvider {
    fn new(entries: &[(&str, [f32; 2])]) -> Self {
        let vectors = entries.iter().map(|(t, v)| (t.to_string(), v.to_vec())).collect();
        Self { vectors, calls: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl EmbeddingProvider for FixtureProvider {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vectors.get(text).cloned().unwrap_or_else(|| vec![0.0, 0.0]))
    }

    fn dimensions(&self) -> usize {
        2
    }
}

struct FailingProvider;

#[async_trait]
impl EmbeddingProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(RagError::EmbeddingError { provider: "failing".into(), message: "offline".into() })
    }

    fn dimensions(&self) -> usize {
        2
    }
}

async fn mars_retriever(provider: Arc<dyn EmbeddingProvider>) -> Retriever {
    Retriever::builder()
        .embedding_provider(provider)
        .corpus(Corpus::from_text(
            "Mars is the red planet. Phobos and Deimos are its moons. Olympus Mons is a volcano.",
        ))
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn empty_corpus_retrieves_nothing_for_any_query() {
    let retriever = Retriever::builder()
        .embedding_provider(Arc::new(HashEmbeddingProvider::default()))
        .corpus(Corpus::from_text("   "))
        .build()
        .await
        .unwrap();

    assert!(!retriever.has_index());
    for query in ["moons of Mars", "", "anything at all"] {
        for k in [0, 1, 3, 100] {
            assert!(retriever.retrieve_with_k(query, k).await.unwrap().is_empty());
        }
    }
}

#[tokio::test]
async fn empty_corpus_search_is_not_ready() {
    let retriever = Retriever::builder()
        .embedding_provider(Arc::new(FailingProvider))
        .build()
        .await
        .unwrap();

    assert!(matches!(retriever.nearest("q", 1).await, Err(RagError::IndexNotReady)));
    assert!(matches!(retriever.search_vector(&[0.0, 0.0], 1), Err(RagError::IndexNotReady)));
    // No index means the provider is never consulted.
    assert!(retriever.retrieve("q").await.unwrap().is_empty());
}

#[tokio::test]
async fn retrieve_returns_nearest_texts_in_distance_order() {
    let provider = Arc::new(FixtureProvider::new(&[
        ("Mars is the red planet", [1.0, 0.0]),
        ("Phobos and Deimos are its moons", [0.0, 1.0]),
        ("Olympus Mons is a volcano", [5.0, 5.0]),
        ("moons", [0.1, 0.9]),
    ]));
    let retriever = mars_retriever(provider).await;

    let facts = retriever.retrieve_with_k("moons", 2).await.unwrap();
    assert_eq!(facts, vec!["Phobos and Deimos are its moons", "Mars is the red planet"]);

    let scored = retriever.retrieve_scored("moons", 3).await.unwrap();
    assert_eq!(scored.len(), 3);
    assert_eq!(scored[2].fact.id, 2);
    assert!(scored[0].distance <= scored[1].distance);
}

#[tokio::test]
async fn default_top_k_is_three() {
    let retriever = Retriever::builder()
        .embedding_provider(Arc::new(HashEmbeddingProvider::default()))
        .corpus(Corpus::from_sentences(["a", "b", "c", "d", "e"]))
        .build()
        .await
        .unwrap();
    assert_eq!(retriever.retrieve("a").await.unwrap().len(), 3);
}

#[tokio::test]
async fn retrieve_is_idempotent() {
    let retriever = mars_retriever(Arc::new(HashEmbeddingProvider::default())).await;
    let first = retriever.retrieve("What are the moons of Mars?").await.unwrap();
    let second = retriever.retrieve("What are the moons of Mars?").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn corpus_is_embedded_once_and_query_once() {
    let provider = Arc::new(FixtureProvider::new(&[]));
    let retriever = mars_retriever(provider.clone()).await;
    assert_eq!(provider.calls.load(Ordering::SeqCst), 3);

    retriever.retrieve("moons").await.unwrap();
    assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn provider_failure_at_build_is_hard() {
    let err = Retriever::builder()
        .embedding_provider(Arc::new(FailingProvider))
        .corpus(Corpus::from_text("Mars is red."))
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, RagError::EmbeddingError { .. }));
}

#[tokio::test]
async fn missing_provider_is_config_error() {
    let err = Retriever::builder().config(RagConfig::default()).build().await.unwrap_err();
    assert!(matches!(err, RagError::ConfigError(_)));
}
