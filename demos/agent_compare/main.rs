//! # Agent Comparison Demo
//!
//! Runs the same questions through both responders, selected only by
//! `AssistantConfig::agent`. The keyword agent matches words literally; the
//! vector agent routes by category and ranks facts by embedding distance.
//!
//! Run: `cargo run -p ara-demos --example agent_compare`

use std::path::PathBuf;

use ara_agent::{AgentKind, AssistantConfig, AssistantRuntime};

fn knowledge_path() -> PathBuf {
    std::env::var_os("ARA_KNOWLEDGE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../knowledge_base.txt")))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    ara_telemetry::init_telemetry("agent_compare", Default::default())?;

    let questions = ["Why is Mars red?", "Tell me about the rovers", "hi!", "How do volcanoes form on Earth?"];

    for agent in [AgentKind::Vector, AgentKind::Keyword] {
        let config = AssistantConfig::builder().agent(agent).knowledge_path(knowledge_path()).build()?;
        let runtime = AssistantRuntime::new(config);
        runtime.initialize().await?;

        println!("\n##### {agent} agent");
        for question in questions {
            let response = runtime.answer(question).await;
            println!("\nQ: {question}\n[{}] {}", response.response_type, response.content);
        }
    }

    Ok(())
}
