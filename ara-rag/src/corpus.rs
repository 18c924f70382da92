//! The fact corpus: a knowledge text split into addressable sentences.
//!
//! Facts are produced by splitting on `.`, trimming whitespace and dropping
//! empty pieces. Ids are assigned in order and never change afterwards.

use std::path::Path;

use tracing::{info, warn};

use crate::document::{Fact, FactId};
use crate::error::{RagError, Result};

/// Character that terminates a fact in the knowledge source.
pub const FACT_TERMINATOR: char = '.';

/// An ordered, immutable sequence of [`Fact`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    facts: Vec<Fact>,
}

/// Split raw knowledge text into trimmed, non-empty fact strings.
pub fn split_facts(text: &str) -> Vec<String> {
    text.split(FACT_TERMINATOR)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .map(str::to_string)
        .collect()
}

impl Corpus {
    /// Build a corpus from an in-memory knowledge text.
    pub fn from_text(text: &str) -> Self {
        Self::from_sentences(split_facts(text))
    }

    /// Build a corpus from already-split sentences.
    ///
    /// Sentences are trimmed and blank ones dropped so ids stay dense.
    pub fn from_sentences<I, S>(sentences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let facts = sentences
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .enumerate()
            .map(|(id, text)| Fact { id, text })
            .collect();
        Self { facts }
    }

    /// Read and split a knowledge file.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::SourceMissing`] if the file cannot be read.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await.map_err(|e| RagError::SourceMissing {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let corpus = Self::from_text(&text);
        info!(stage = "load", path = %path.display(), fact_count = corpus.len(), "knowledge source loaded");
        Ok(corpus)
    }

    /// Like [`Corpus::load`] but degrades to an empty corpus when the source is missing.
    pub async fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path).await {
            Ok(corpus) => corpus,
            Err(e) => {
                warn!(stage = "load", error = %e, "continuing with an empty corpus");
                Self::default()
            }
        }
    }

    /// All facts in id order.
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Look up a fact by id.
    pub fn get(&self, id: FactId) -> Option<&Fact> {
        self.facts.get(id)
    }

    /// Fact texts in id order, for batch embedding.
    pub fn texts(&self) -> Vec<&str> {
        self.facts.iter().map(|f| f.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}
