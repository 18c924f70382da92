use anyhow::Result;
use ara_agent::AssistantRuntime;
use ara_cli::repl::{generate, render, run_chat};
use ara_cli::{Cli, Commands};
use clap::Parser;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    ara_telemetry::init_telemetry("ara-cli", cli.log_format.into())?;

    let config = cli.resolve_config().await?;
    info!(agent = %config.agent, knowledge_path = %config.knowledge_path.display(), "starting assistant");

    let runtime = AssistantRuntime::new(config);
    // Keep serving; queries answer `unavailable` until the runtime is built.
    if let Err(e) = runtime.initialize().await {
        error!(stage = "initialize", error = %e, "assistant failed to initialize");
    }

    match cli.command() {
        Commands::Chat => run_chat(&runtime, cli.json).await?,
        Commands::Ask { query } => {
            let response = runtime.answer(&query).await;
            println!("{}", render(&response, cli.json)?);
        }
        Commands::Generate { query } => println!("{}", generate(&runtime, &query).await),
    }

    Ok(())
}
