//! # ara-cli
//!
//! The `ara` command: an interactive chat over the research assistant, plus
//! one-shot `ask` and `generate` subcommands.
//!
//! ```text
//! ara --knowledge knowledge_base.txt
//! ara ask "What are the moons of Mars?" --json
//! ara --agent keyword generate "Why is Mars red?"
//! ```

pub mod cli;
pub mod repl;

pub use cli::{Cli, Commands};
