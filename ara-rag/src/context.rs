//! Context assembly for the generation stage.
//!
//! [`assemble_context`] renders the single text block handed to a
//! [`Generator`]: a fixed system instruction, one bullet per retrieved fact and
//! the user's question, inside a fixed delimiter frame. The frame layout is a
//! wire contract with the generation stage; change it only together with the
//! generator.

use async_trait::async_trait;
use tracing::debug;

/// Instruction placed at the top of every assembled context block.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful AI Research Assistant. Your task is to answer the user's question based *only* on the provided context. If the context does not contain the answer, say 'I do not have enough information to answer this question.'";

/// Line delimiting the start and end of an assembled block.
pub const FRAME_DELIMITER: &str = "---------------------------------";

/// Render the context block for `query` and the already-retrieved `facts`.
///
/// Each fact becomes a `- fact.` bullet. The output is a pure function of its
/// inputs.
pub fn assemble_context<S: AsRef<str>>(query: &str, facts: &[S]) -> String {
    let context = facts
        .iter()
        .map(|fact| format!("- {}.", fact.as_ref()))
        .collect::<Vec<_>>()
        .join("\n");

    let block = format!(
        "\n{FRAME_DELIMITER}\n[SYSTEM PROMPT]\n{SYSTEM_INSTRUCTION}\n\n[CONTEXT]\n{context}\n\n[USER QUESTION]\n{query}\n{FRAME_DELIMITER}\n"
    );
    debug!(stage = "assemble", fact_count = facts.len(), block_len = block.len(), "assembled context block");
    block
}

/// The generation stage: turns one assembled context block into an answer.
///
/// Implementations must be idempotent and side-effect free for the same input.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce an answer for an assembled context block.
    async fn generate(&self, prompt: &str) -> String;
}

/// Fixed output returned by [`PlaceholderGenerator`].
pub const PLACEHOLDER_OUTPUT: &str = "\n[Simulated LLM Output]\nBased on the provided context, here is the answer to your question:\n(The LLM would generate a natural language answer here based on the context)\n";

/// A [`Generator`] that stands in for a language model.
///
/// It ignores its input and returns [`PLACEHOLDER_OUTPUT`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderGenerator;

#[async_trait]
impl Generator for PlaceholderGenerator {
    async fn generate(&self, prompt: &str) -> String {
        debug!(stage = "generate", prompt_len = prompt.len(), "placeholder generation");
        PLACEHOLDER_OUTPUT.to_string()
    }
}
