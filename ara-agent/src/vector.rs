//! The embedding-backed assistant.

use async_trait::async_trait;
use ara_rag::Retriever;
use tracing::info;

use crate::classifier::{Classification, QueryClassifier};
use crate::error::Result;
use crate::responder::Responder;
use crate::response::{ResponseData, compose};

/// Classifies each query and, for topic queries, answers from the nearest facts.
#[derive(Debug)]
pub struct VectorResponder {
    classifier: QueryClassifier,
    retriever: Retriever,
}

impl VectorResponder {
    pub fn new(classifier: QueryClassifier, retriever: Retriever) -> Self {
        Self { classifier, retriever }
    }

    pub fn classifier(&self) -> &QueryClassifier {
        &self.classifier
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Classify `query` without composing a response.
    ///
    /// # Errors
    ///
    /// Propagates embedding-provider failures.
    pub async fn classify(&self, query: &str) -> Result<Classification> {
        self.classifier.classify(query, &self.retriever).await
    }
}

#[async_trait]
impl Responder for VectorResponder {
    fn name(&self) -> &str {
        "vector"
    }

    async fn retrieve(&self, query: &str) -> Result<Vec<String>> {
        Ok(self.retriever.retrieve(query).await?)
    }

    async fn get_response(&self, query: &str) -> Result<ResponseData> {
        let classification = self.classify(query).await?;

        let facts = match classification {
            Classification::TopicMatch => self.retrieve(query).await?,
            _ => Vec::new(),
        };

        let response = compose(classification, query, &facts);
        info!(
            stage = "compose",
            query_len = query.len(),
            category = %classification,
            response_type = %response.response_type,
            fact_count = facts.len(),
            "response composed"
        );
        Ok(response)
    }
}
