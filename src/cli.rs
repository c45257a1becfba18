//! Command-line interface for llm_tictactoe.

use crate::match_config::{ConfigError, MatchConfig, TelemetryConfig};
use crate::presets::ModelPreset;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::instrument;

/// LLM Tic-Tac-Toe - play against, or watch, language models
#[derive(Parser, Debug)]
#[command(name = "llm_tictactoe")]
#[command(about = "Tic-tac-toe between humans and language models", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against a model in the terminal UI (the model moves first as O)
    Human {
        /// Match settings
        #[command(flatten)]
        args: MatchArgs,

        /// Where to write logs while the UI owns the terminal
        #[arg(long, default_value = "llm_tictactoe_tui.log")]
        log_file: PathBuf,
    },

    /// Watch two models play each other on the console
    Duel {
        /// Match settings
        #[command(flatten)]
        args: MatchArgs,
    },

    /// List the model presets
    Models,
}

/// Flags shared by every game command.
#[derive(Args, Debug, Clone)]
pub struct MatchArgs {
    /// Path to match configuration file (used if it exists)
    #[arg(short, long, default_value = "tictactoe.toml")]
    pub config: PathBuf,

    /// Preset for the first mover (O)
    #[arg(long)]
    pub player_one: Option<ModelPreset>,

    /// Preset for the second mover (X)
    #[arg(long)]
    pub player_two: Option<ModelPreset>,

    /// Attempts per turn before a side forfeits
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Disable telemetry even when credentials are set
    #[arg(long)]
    pub no_trace: bool,
}

impl MatchArgs {
    /// Loads the configuration file and applies the command-line overrides.
    #[instrument(skip(self), fields(config = %self.config.display()))]
    pub fn resolve(&self) -> Result<MatchConfig, ConfigError> {
        let mut config = MatchConfig::load_or_default(&self.config)?;

        if let Some(preset) = self.player_one {
            config = config.with_player_one(preset.player_config());
        }
        if let Some(preset) = self.player_two {
            config = config.with_player_two(preset.player_config());
        }
        if let Some(max_attempts) = self.max_attempts {
            config = config.with_max_attempts(max_attempts)?;
        }
        if self.no_trace {
            config = config.with_telemetry(TelemetryConfig::disabled());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_config::PlayerKind;

    #[test]
    fn test_parse_duel_overrides() {
        let cli = Cli::try_parse_from([
            "llm_tictactoe",
            "duel",
            "--config",
            "does-not-exist.toml",
            "--player-one",
            "simple",
            "--player-two",
            "Deepseek",
            "--max-attempts",
            "5",
            "--no-trace",
        ])
        .unwrap();

        let Command::Duel { args } = cli.command else {
            panic!("expected duel");
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.player_one().kind(), &PlayerKind::Simple);
        assert_eq!(config.player_two().model(), "deepseek-v3.2:cloud");
        assert_eq!(*config.max_attempts(), 5);
        assert!(!config.telemetry().enabled());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let cli = Cli::try_parse_from([
            "llm_tictactoe",
            "duel",
            "--config",
            "does-not-exist.toml",
            "--max-attempts",
            "0",
        ])
        .unwrap();
        let Command::Duel { args } = cli.command else {
            panic!("expected duel");
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_human_default_log_file() {
        let cli = Cli::try_parse_from(["llm_tictactoe", "human"]).unwrap();
        let Command::Human { log_file, args } = cli.command else {
            panic!("expected human");
        };
        assert_eq!(log_file, PathBuf::from("llm_tictactoe_tui.log"));
        assert_eq!(args.config, PathBuf::from("tictactoe.toml"));
    }

    #[test]
    fn test_unknown_preset_rejected() {
        assert!(Cli::try_parse_from(["llm_tictactoe", "duel", "--player-one", "gpt9"]).is_err());
    }
}
