//! Query routing.
//!
//! [`QueryClassifier`] decides, per query, which kind of answer to compose.
//! Rules are checked in a fixed priority order and the first hit wins:
//!
//! 1. a `meta` keyword → [`Classification::Meta`]
//! 2. a `greeting` keyword → [`Classification::Greeting`]
//! 3. a `topic` keyword → [`Classification::TopicMatch`]
//! 4. nearest fact closer than the threshold → [`Classification::TopicMatch`]
//! 5. otherwise → [`Classification::Unknown`]
//!
//! Keyword rules are case-insensitive substring tests on the raw query, so
//! `"hi"` also fires inside `"this"`. Step 4 is skipped when there is no index.

use std::fmt;

use ara_rag::Retriever;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

/// The routing category of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Greeting,
    Meta,
    TopicMatch,
    /// Only produced by the composer, when a topic query retrieves nothing.
    NoInfo,
    Unknown,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Greeting => "greeting",
            Classification::Meta => "meta",
            Classification::TopicMatch => "topic_match",
            Classification::NoInfo => "no_info",
            Classification::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three keyword lists consulted by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordSets {
    pub meta: Vec<String>,
    pub greeting: Vec<String>,
    pub topic: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for KeywordSets {
    fn default() -> Self {
        Self {
            meta: owned(&["who are you", "what are you", "your name", "what can you do", "help"]),
            greeting: owned(&["hello", "hi", "hey", "greetings"]),
            topic: owned(&[
                "mars",
                "planet",
                "red planet",
                "olympus mons",
                "valles marineris",
                "phobos",
                "deimos",
                "rover",
                "curiosity",
                "perseverance",
                "insight",
                "water",
                "ice",
                "atmosphere",
                "seasons",
                "moons",
            ]),
        }
    }
}

impl KeywordSets {
    /// Lower-case and trim every keyword, dropping blanks.
    ///
    /// A blank keyword would match every query.
    pub fn normalized(self) -> Self {
        fn clean(words: Vec<String>) -> Vec<String> {
            words
                .into_iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        }
        Self { meta: clean(self.meta), greeting: clean(self.greeting), topic: clean(self.topic) }
    }
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}

/// Rule-based query router with a vector-proximity fallback.
#[derive(Debug, Clone)]
pub struct QueryClassifier {
    keywords: KeywordSets,
    similarity_threshold: f32,
}

impl QueryClassifier {
    pub fn new(keywords: KeywordSets, similarity_threshold: f32) -> Self {
        Self { keywords: keywords.normalized(), similarity_threshold }
    }

    pub fn keywords(&self) -> &KeywordSets {
        &self.keywords
    }

    pub fn similarity_threshold(&self) -> f32 {
        self.similarity_threshold
    }

    /// Apply the keyword rules (steps 1–3) only.
    pub fn match_keywords(&self, query: &str) -> Option<Classification> {
        let query = query.to_lowercase();
        if contains_any(&query, &self.keywords.meta) {
            Some(Classification::Meta)
        } else if contains_any(&query, &self.keywords.greeting) {
            Some(Classification::Greeting)
        } else if contains_any(&query, &self.keywords.topic) {
            Some(Classification::TopicMatch)
        } else {
            None
        }
    }

    /// Classify by nearest-neighbor distance (steps 4–5).
    ///
    /// `None` means there was no index to search. A distance equal to the
    /// threshold is not a match.
    pub fn classify_distance(&self, nearest: Option<f32>) -> Classification {
        match nearest {
            Some(distance) if distance < self.similarity_threshold => Classification::TopicMatch,
            _ => Classification::Unknown,
        }
    }

    /// Run the full decision order against `retriever`'s index.
    ///
    /// # Errors
    ///
    /// Only embedding-provider failures surface; a missing index falls
    /// through to [`Classification::Unknown`].
    pub async fn classify(&self, query: &str, retriever: &Retriever) -> Result<Classification> {
        if let Some(classification) = self.match_keywords(query) {
            info!(
                stage = "classify",
                rule = "keyword",
                query_len = query.len(),
                category = %classification,
                "query classified"
            );
            return Ok(classification);
        }

        let nearest = match retriever.nearest(query, 1).await {
            Ok(neighbors) => neighbors.first().map(|n| n.distance),
            Err(e) if e.is_not_ready() => {
                debug!(stage = "classify", "no index, skipping vector proximity");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let classification = self.classify_distance(nearest);
        info!(
            stage = "classify",
            rule = "vector",
            query_len = query.len(),
            nearest_distance = nearest.map(f64::from),
            threshold = f64::from(self.similarity_threshold),
            category = %classification,
            "query classified"
        );
        Ok(classification)
    }
}
