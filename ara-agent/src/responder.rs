//! The common interface of the assistant variants.

use async_trait::async_trait;
use ara_rag::{Generator, PlaceholderGenerator, assemble_context};

use crate::error::Result;
use crate::response::ResponseData;

/// Answers one query at a time.
///
/// Implementations are built once by [`AssistantRuntime`](crate::AssistantRuntime)
/// and shared read-only afterwards.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// The fact texts this variant considers relevant to `query`.
    async fn retrieve(&self, query: &str) -> Result<Vec<String>>;

    /// Compose the structured answer to `query`.
    async fn get_response(&self, query: &str) -> Result<ResponseData>;

    /// Retrieve, assemble the context block and hand it to the generation
    /// stage.
    ///
    /// The default runs [`PlaceholderGenerator`].
    async fn answer_question(&self, query: &str) -> Result<String> {
        let facts = self.retrieve(query).await?;
        let prompt = assemble_context(query, &facts);
        Ok(PlaceholderGenerator.generate(&prompt).await)
    }
}
