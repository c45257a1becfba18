//! LLM Tic-Tac-Toe - Unified CLI
//!
//! Human-vs-model in the terminal, or model-vs-model on the console.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use llm_tictactoe::cli::{Cli, Command};
use llm_tictactoe::{ModelPreset, console, tui};
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,llm_tictactoe=debug";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Human { args, log_file } => {
            init_file_logging(&log_file)?;
            let config = args.resolve()?;
            tui::run_human_game(&config).await
        }
        Command::Duel { args } => {
            init_stderr_logging();
            let config = args.resolve()?;
            run_duel(&config).await
        }
        Command::Models => {
            list_models();
            Ok(())
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Setup logging to file to avoid interfering with the UI.
fn init_file_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[instrument(skip(config))]
async fn run_duel(config: &llm_tictactoe::MatchConfig) -> Result<()> {
    let outcome = console::run_duel(config).await?;
    info!(%outcome, "Duel finished");
    Ok(())
}

fn list_models() {
    for preset in ModelPreset::iter() {
        match preset.backend() {
            Some((provider, model)) => println!("{:<10} {:<10} {}", preset, provider, model),
            None => println!("{:<10} {:<10} first empty cell, no backend", preset, "offline"),
        }
    }
}
