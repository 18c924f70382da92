//! Response data model and composition.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classifier::Classification;

pub const GREETING_MESSAGE: &str =
    "Hello! I am an AI Research Assistant focused on Mars. How can I help you?";

pub const META_MESSAGE: &str = "I am an AI Research Assistant. My purpose is to answer questions about the planet Mars based on a specific knowledge base. I can tell you about its physical characteristics, missions, moons, and more.";

pub const NO_INFO_MESSAGE: &str =
    "I found a related topic but have no specific information to answer your question.";

pub const UNKNOWN_MESSAGE: &str = "I'm sorry, my knowledge is limited to the planet Mars. I can't answer questions on other topics.";

pub const KEYWORD_NOT_FOUND_MESSAGE: &str =
    "I could not find any relevant information in my knowledge base to answer this question.";

pub const UNAVAILABLE_MESSAGE: &str =
    "The assistant is temporarily unavailable. Please try again later.";

/// The `type` tag of a [`ResponseData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Greeting,
    Meta,
    TopicMatch,
    NoInfo,
    Unknown,
    /// Produced by the keyword-only responder.
    KeywordSearch,
    /// A hard failure converted at the caller boundary.
    Unavailable,
}

impl ResponseType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseType::Greeting => "greeting",
            ResponseType::Meta => "meta",
            ResponseType::TopicMatch => "topic_match",
            ResponseType::NoInfo => "no_info",
            ResponseType::Unknown => "unknown",
            ResponseType::KeywordSearch => "keyword_search",
            ResponseType::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Classification> for ResponseType {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Greeting => ResponseType::Greeting,
            Classification::Meta => ResponseType::Meta,
            Classification::TopicMatch => ResponseType::TopicMatch,
            Classification::NoInfo => ResponseType::NoInfo,
            Classification::Unknown => ResponseType::Unknown,
        }
    }
}

/// A composed answer, serialized as `{"type": "...", "content": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseData {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub content: String,
}

impl ResponseData {
    pub fn new(response_type: ResponseType, content: impl Into<String>) -> Self {
        Self { response_type, content: content.into() }
    }

    pub fn unavailable() -> Self {
        Self::new(ResponseType::Unavailable, UNAVAILABLE_MESSAGE)
    }
}

/// Render retrieved facts as the bulleted answer block.
pub fn format_fact_list<S: AsRef<str>>(query: &str, facts: &[S]) -> String {
    let bullets: Vec<String> = facts.iter().map(|f| format!("- {}", f.as_ref())).collect();
    format!("Based on my knowledge, here is what I found about '{}':\n\n{}", query, bullets.join("\n"))
}

/// Build the response for a classified query.
///
/// `facts` is only consulted for [`Classification::TopicMatch`]; an empty
/// list turns the response into `no_info`.
pub fn compose<S: AsRef<str>>(classification: Classification, query: &str, facts: &[S]) -> ResponseData {
    match classification {
        Classification::Greeting => ResponseData::new(ResponseType::Greeting, GREETING_MESSAGE),
        Classification::Meta => ResponseData::new(ResponseType::Meta, META_MESSAGE),
        Classification::TopicMatch if facts.is_empty() => {
            ResponseData::new(ResponseType::NoInfo, NO_INFO_MESSAGE)
        }
        Classification::TopicMatch => {
            ResponseData::new(ResponseType::TopicMatch, format_fact_list(query, facts))
        }
        Classification::NoInfo => ResponseData::new(ResponseType::NoInfo, NO_INFO_MESSAGE),
        Classification::Unknown => ResponseData::new(ResponseType::Unknown, UNKNOWN_MESSAGE),
    }
}
