//! # ara-agent
//!
//! Query routing and answer composition for the ARA research assistant.
//!
//! ## Overview
//!
//! - [`QueryClassifier`]: keyword rules, then vector proximity to the corpus
//! - [`compose`] / [`ResponseData`]: the typed answer for each category
//! - [`Responder`]: one interface, two variants: [`VectorResponder`] and the
//!   embedding-free [`KeywordResponder`]
//! - [`AssistantConfig`]: serde/YAML configuration selecting the variant
//! - [`AssistantRuntime`]: builds the responder once and never fails a query
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ara_agent::{AssistantConfig, AssistantRuntime};
//!
//! let runtime = AssistantRuntime::new(AssistantConfig::default());
//! runtime.initialize().await?;
//! let response = runtime.answer("What are the moons of Mars?").await;
//! println!("{}", response.content);
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod keyword;
pub mod responder;
pub mod response;
pub mod runtime;
pub mod vector;

pub use classifier::{Classification, KeywordSets, QueryClassifier};
pub use config::{AgentKind, AssistantConfig, AssistantConfigBuilder, DEFAULT_KNOWLEDGE_PATH, EmbeddingBackend};
pub use error::{AgentError, Result};
pub use keyword::KeywordResponder;
pub use responder::Responder;
pub use response::{ResponseData, ResponseType, compose, format_fact_list};
pub use runtime::AssistantRuntime;
pub use vector::VectorResponder;
