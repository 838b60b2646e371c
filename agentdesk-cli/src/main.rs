//! Agentdesk CLI
//!
//! Manages LLM provider configurations and the models assigned to the
//! planner and navigator agents.

mod commands;

use std::path::PathBuf;

use agentdesk_core::{Database, ModelSettings};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::Command;

/// Agentdesk - provider and agent model settings
#[derive(Parser, Debug)]
#[command(name = "agentdesk", author, version, about)]
struct Args {
    /// Settings database (defaults to the platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("agentdesk={0},agentdesk_core={0}", args.log_level))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting Agentdesk v{}", agentdesk_core::VERSION);

    let mut settings = ModelSettings::<Database>::open(args.db)?;
    commands::execute(args.command, &mut settings)
}
