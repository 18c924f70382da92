use anyhow::Result;
use ara_agent::response::UNAVAILABLE_MESSAGE;
use ara_agent::{AssistantRuntime, ResponseData};
use ara_rag::assemble_context;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::error;

pub const WELCOME: &str = "Hello! I am an AI Research Assistant. Ask me a question about Mars.";

const PROMPT: &str = "You > ";

/// Render a response for the terminal.
pub fn render(response: &ResponseData, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string(response)?)
    } else {
        Ok(response.content.clone())
    }
}

/// The generation prompt for `query` followed by the generator's answer.
///
/// Failures, including an uninitialized runtime, yield the unavailable
/// message instead of ending the process.
pub async fn generate(runtime: &AssistantRuntime, query: &str) -> String {
    match try_generate(runtime, query).await {
        Ok(output) => output,
        Err(e) => {
            error!(stage = "generate", error = %e, "failed to generate answer");
            UNAVAILABLE_MESSAGE.to_string()
        }
    }
}

async fn try_generate(runtime: &AssistantRuntime, query: &str) -> ara_agent::Result<String> {
    let responder = runtime.responder()?;
    let facts = responder.retrieve(query).await?;
    let answer = responder.answer_question(query).await?;
    Ok(format!("{}\n{answer}", assemble_context(query, &facts)))
}

fn is_exit(line: &str) -> bool {
    matches!(line, "exit" | "quit" | "/exit" | "/quit")
}

/// Read queries until EOF, Ctrl-C or `exit`, answering each in turn.
pub async fn run_chat(runtime: &AssistantRuntime, json: bool) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    println!("{WELCOME}");
    println!("(type 'exit' to quit)\n");

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if is_exit(query) {
            break;
        }
        let _ = rl.add_history_entry(query);

        let response = runtime.answer(query).await;
        println!("\nAssistant > {}\n", render(&response, json)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ara_agent::{AgentKind, AssistantConfig, EmbeddingBackend, ResponseType};
    use ara_rag::Corpus;

    fn keyword_runtime() -> AssistantRuntime {
        let config = AssistantConfig::builder().agent(AgentKind::Keyword).build().unwrap();
        AssistantRuntime::new(config).with_corpus(Corpus::from_text("Mars has two moons. Olympus Mons is a volcano."))
    }

    #[test]
    fn renders_content_or_json() {
        let response = ResponseData::new(ResponseType::Greeting, "Hello!");
        assert_eq!(render(&response, false).unwrap(), "Hello!");
        assert_eq!(render(&response, true).unwrap(), r#"{"type":"greeting","content":"Hello!"}"#);
    }

    #[test]
    fn exit_words() {
        assert!(is_exit("quit"));
        assert!(is_exit("/exit"));
        assert!(!is_exit("exit velocity of Mars"));
    }

    #[tokio::test]
    async fn generate_prints_prompt_then_answer() {
        let runtime = keyword_runtime();
        runtime.initialize().await.unwrap();

        let output = generate(&runtime, "moons").await;
        assert!(output.contains("Mars has two moons"));
        assert!(!output.contains("Olympus Mons"));
        assert!(output.ends_with(ara_rag::context::PLACEHOLDER_OUTPUT));
    }

    #[tokio::test]
    async fn generate_before_initialize_is_unavailable() {
        assert_eq!(generate(&keyword_runtime(), "moons").await, UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn failed_initialize_keeps_answering_unavailable() {
        let mut config = AssistantConfig::default();
        config.embedding = EmbeddingBackend::Hash { dimensions: 0 };
        let runtime = AssistantRuntime::new(config);

        assert!(runtime.initialize().await.is_err());
        assert!(!runtime.is_initialized());

        let response = runtime.answer("moons of Mars").await;
        assert_eq!(response.response_type, ResponseType::Unavailable);
        assert_eq!(generate(&runtime, "moons of Mars").await, UNAVAILABLE_MESSAGE);
    }
}
