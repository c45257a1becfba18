//! Non-interactive LLM-vs-LLM match printed to stdout.

use crate::games::tictactoe::{Outcome, Player};
use crate::match_config::MatchConfig;
use crate::orchestrator::{GameEvent, Orchestrator};
use crate::players;
use crate::telemetry::Telemetry;
use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{info, instrument};

/// Plays one game between the two configured players and prints every
/// move, the board after it, and a final summary.
#[instrument(skip(config), fields(
    player_one = %config.player_one().name(),
    player_two = %config.player_two().name()
))]
pub async fn run_duel(config: &MatchConfig) -> Result<Outcome> {
    let player_one = players::from_config(config.player_one())
        .context("Failed to create player one")?;
    let player_two = players::from_config(config.player_two())
        .context("Failed to create player two")?;

    let telemetry = Telemetry::connect(config.telemetry()).await;
    info!(trace_id = %telemetry.trace_id(), tracing = telemetry.is_enabled(), "Starting duel");

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_events(event_rx));

    let mut orchestrator = Orchestrator::new(player_one, player_two)
        .with_max_attempts(*config.max_attempts())
        .with_events(event_tx)
        .with_telemetry(telemetry);

    println!(
        "{} ({}) vs {} ({})",
        config.player_one().name(),
        Player::FIRST,
        config.player_two().name(),
        Player::FIRST.opponent()
    );
    let outcome = orchestrator.run().await;

    // Dropping the orchestrator closes the channel so the printer drains and exits.
    drop(orchestrator);
    printer.await.context("Event printer panicked")?;

    Ok(outcome)
}

async fn print_events(mut event_rx: mpsc::UnboundedReceiver<GameEvent>) {
    while let Some(event) = event_rx.recv().await {
        for line in describe(&event) {
            println!("{}", line);
        }
    }
}

/// Console lines for one event.
pub fn describe(event: &GameEvent) -> Vec<String> {
    match event {
        GameEvent::TurnStarted { .. } => Vec::new(),
        GameEvent::MoveRejected {
            player,
            name,
            reason,
            attempt,
        } => vec![format!(
            "{} ({}) attempt {} rejected: {}",
            name, player, attempt, reason
        )],
        GameEvent::MoveMade {
            player,
            name,
            position,
            board,
        } => vec![
            format!("{} ({}) plays {}", name, player, position),
            board.display(),
            String::new(),
        ],
        GameEvent::GameOver { outcome, usage } => vec![
            format!("Final result: {}", outcome),
            format!("Tokens used by O: {}", usage.o),
            format!("Tokens used by X: {}", usage.x),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Board, Position, TokenUsage};

    #[test]
    fn test_describe_move_prints_board() {
        let mut board = Board::new();
        board.set(Position::Center, crate::games::tictactoe::Square::Occupied(Player::O));
        let lines = describe(&GameEvent::MoveMade {
            player: Player::O,
            name: "minimax".to_string(),
            position: Position::Center,
            board,
        });
        assert_eq!(lines[0], "minimax (O) plays (1,1)");
        assert!(lines[1].contains(" O "));
    }

    #[test]
    fn test_describe_game_over_summary() {
        let lines = describe(&GameEvent::GameOver {
            outcome: Outcome::Draw,
            usage: TokenUsage { x: 12, o: 30 },
        });
        assert!(lines[0].starts_with("Final result:"));
        assert_eq!(lines[1], "Tokens used by O: 30");
        assert_eq!(lines[2], "Tokens used by X: 12");
    }

    #[test]
    fn test_turn_started_is_silent() {
        let lines = describe(&GameEvent::TurnStarted {
            player: Player::X,
            name: "sarvam".to_string(),
            attempt: 1,
        });
        assert!(lines.is_empty());
    }
}
