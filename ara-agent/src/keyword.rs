//! The keyword-only assistant.
//!
//! Matches query words against fact text without any embedding, and can hand
//! the matches to a [`Generator`] through the context assembly block.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use ara_rag::{Corpus, Generator, PlaceholderGenerator, assemble_context};
use tracing::info;

use crate::error::Result;
use crate::responder::Responder;
use crate::response::{KEYWORD_NOT_FOUND_MESSAGE, ResponseData, ResponseType, format_fact_list};

/// Substring keyword retrieval over a corpus.
pub struct KeywordResponder {
    corpus: Corpus,
    generator: Arc<dyn Generator>,
}

impl std::fmt::Debug for KeywordResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordResponder").field("fact_count", &self.corpus.len()).finish()
    }
}

impl KeywordResponder {
    /// A responder using [`PlaceholderGenerator`].
    pub fn new(corpus: Corpus) -> Self {
        Self::with_generator(corpus, Arc::new(PlaceholderGenerator))
    }

    pub fn with_generator(corpus: Corpus, generator: Arc<dyn Generator>) -> Self {
        Self { corpus, generator }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Every fact, in corpus order, containing any whitespace-separated word
    /// of `query` (case-insensitive substring test).
    pub fn matching_facts(&self, query: &str) -> Vec<String> {
        let lowered = query.to_lowercase();
        let words: HashSet<&str> = lowered.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        self.corpus
            .facts()
            .iter()
            .filter(|fact| {
                let text = fact.text.to_lowercase();
                words.iter().any(|w| text.contains(*w))
            })
            .map(|fact| fact.text.clone())
            .collect()
    }
}

#[async_trait]
impl Responder for KeywordResponder {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn retrieve(&self, query: &str) -> Result<Vec<String>> {
        let facts = self.matching_facts(query);
        info!(stage = "retrieve", query_len = query.len(), result_count = facts.len(), "keyword facts retrieved");
        Ok(facts)
    }

    async fn get_response(&self, query: &str) -> Result<ResponseData> {
        let facts = self.retrieve(query).await?;
        let content = if facts.is_empty() {
            KEYWORD_NOT_FOUND_MESSAGE.to_string()
        } else {
            format_fact_list(query, &facts)
        };
        info!(
            stage = "compose",
            query_len = query.len(),
            response_type = "keyword_search",
            fact_count = facts.len(),
            "response composed"
        );
        Ok(ResponseData::new(ResponseType::KeywordSearch, content))
    }

    async fn answer_question(&self, query: &str) -> Result<String> {
        let facts = self.retrieve(query).await?;

        let prompt = assemble_context(query, &facts);
        info!(stage = "assemble", fact_count = facts.len(), prompt_len = prompt.len(), "context assembled");

        let answer = self.generator.generate(&prompt).await;
        info!(stage = "generate", answer_len = answer.len(), "answer generated");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responder() -> KeywordResponder {
        KeywordResponder::new(Corpus::from_text(
            "Mars has two moons. Olympus Mons is a volcano. The atmosphere is thin.",
        ))
    }

    #[test]
    fn matches_any_word_in_corpus_order() {
        let facts = responder().matching_facts("VOLCANO moons");
        assert_eq!(facts, vec!["Mars has two moons", "Olympus Mons is a volcano"]);
    }

    #[test]
    fn words_match_as_substrings() {
        assert_eq!(responder().matching_facts("atmos"), vec!["The atmosphere is thin"]);
    }

    #[test]
    fn blank_query_matches_nothing() {
        assert!(responder().matching_facts("   ").is_empty());
    }

    #[tokio::test]
    async fn empty_match_uses_not_found_message() {
        let response = responder().get_response("jupiter").await.unwrap();
        assert_eq!(response.response_type, ResponseType::KeywordSearch);
        assert_eq!(response.content, KEYWORD_NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn matches_render_as_bullets() {
        let response = responder().get_response("thin").await.unwrap();
        assert_eq!(
            response.content,
            "Based on my knowledge, here is what I found about 'thin':\n\n- The atmosphere is thin"
        );
    }

    #[tokio::test]
    async fn answer_question_returns_generator_output() {
        let answer = responder().answer_question("moons").await.unwrap();
        assert_eq!(answer, ara_rag::context::PLACEHOLDER_OUTPUT);
    }
}
