use std::path::PathBuf;

use anyhow::{Context, Result};
use ara_agent::{AgentKind, AssistantConfig};
use ara_telemetry::LogFormat;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "ara", version, about = "AI Research Assistant: answers questions about Mars from a knowledge file")]
pub struct Cli {
    /// YAML config file; flags below override its values
    #[arg(short, long, env = "ARA_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Knowledge file, split into facts on '.'
    #[arg(short, long, env = "ARA_KNOWLEDGE_PATH", global = true)]
    pub knowledge: Option<PathBuf>,

    /// Which responder to run
    #[arg(short, long, env = "ARA_AGENT", value_enum, global = true)]
    pub agent: Option<AgentArg>,

    /// Nearest-fact distance below which a query counts as on topic
    #[arg(long, env = "ARA_SIMILARITY_THRESHOLD", global = true)]
    pub threshold: Option<f32>,

    /// Number of facts listed per answer
    #[arg(long, env = "ARA_TOP_K", global = true)]
    pub top_k: Option<usize>,

    /// Print responses as JSON objects
    #[arg(long, global = true)]
    pub json: bool,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormatArg::Text, global = true)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive conversation (default)
    Chat,
    /// Answer one question and exit
    Ask {
        /// The question
        query: String,
    },
    /// Print the generation prompt for a question and the generator's output
    Generate {
        /// The question
        query: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentArg {
    Vector,
    Keyword,
}

impl From<AgentArg> for AgentKind {
    fn from(arg: AgentArg) -> Self {
        match arg {
            AgentArg::Vector => AgentKind::Vector,
            AgentArg::Keyword => AgentKind::Keyword,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

impl Cli {
    /// The subcommand to run, `chat` when none was given.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Chat)
    }

    /// Load the config file, if any, and apply flag overrides.
    pub async fn resolve_config(&self) -> Result<AssistantConfig> {
        let base = match &self.config {
            Some(path) => AssistantConfig::from_yaml_file(path)
                .await
                .with_context(|| format!("loading config {}", path.display()))?,
            None => AssistantConfig::default(),
        };
        self.apply_overrides(base)
    }

    pub fn apply_overrides(&self, base: AssistantConfig) -> Result<AssistantConfig> {
        let mut builder = AssistantConfig::builder()
            .agent(base.agent)
            .knowledge_path(base.knowledge_path)
            .keywords(base.keywords)
            .rag(base.rag)
            .embedding(base.embedding);

        if let Some(agent) = self.agent {
            builder = builder.agent(agent.into());
        }
        if let Some(path) = &self.knowledge {
            builder = builder.knowledge_path(path.clone());
        }
        if let Some(threshold) = self.threshold {
            builder = builder.similarity_threshold(threshold);
        }
        if let Some(top_k) = self.top_k {
            builder = builder.top_k(top_k);
        }

        builder.build().context("invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_chat() {
        let cli = Cli::try_parse_from(["ara"]).unwrap();
        assert_eq!(cli.command(), Commands::Chat);
        assert!(!cli.json);
        assert_eq!(cli.log_format, LogFormatArg::Text);
    }

    #[test]
    fn parses_ask_with_global_flags() {
        let cli = Cli::try_parse_from([
            "ara",
            "ask",
            "What are the moons of Mars?",
            "--agent",
            "keyword",
            "--top-k",
            "5",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.command(), Commands::Ask { query: "What are the moons of Mars?".into() });
        assert_eq!(cli.agent, Some(AgentArg::Keyword));
        assert_eq!(cli.top_k, Some(5));
        assert!(cli.json);
    }

    #[test]
    fn flags_override_config_values() {
        let cli = Cli::try_parse_from(["ara", "--knowledge", "facts.txt", "--threshold", "0.5"]).unwrap();
        let base = AssistantConfig::builder().top_k(4).agent(AgentKind::Keyword).build().unwrap();

        let config = cli.apply_overrides(base).unwrap();

        assert_eq!(config.knowledge_path, PathBuf::from("facts.txt"));
        assert_eq!(config.rag.similarity_threshold, 0.5);
        assert_eq!(config.rag.top_k, 4);
        assert_eq!(config.agent, AgentKind::Keyword);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let cli = Cli::try_parse_from(["ara", "--top-k", "0"]).unwrap();
        assert!(cli.apply_overrides(AssistantConfig::default()).is_err());
    }

    #[test]
    fn rejects_unknown_agent() {
        assert!(Cli::try_parse_from(["ara", "--agent", "faiss"]).is_err());
    }

    #[tokio::test]
    async fn reads_yaml_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ara.yaml");
        std::fs::write(&path, "agent: keyword\nrag:\n  top_k: 2\n").unwrap();

        let cli = Cli::try_parse_from(["ara", "--config", path.to_str().unwrap(), "--top-k", "6"]).unwrap();
        let config = cli.resolve_config().await.unwrap();

        assert_eq!(config.agent, AgentKind::Keyword);
        assert_eq!(config.rag.top_k, 6);
    }
}
