//! Application state and logic.

use crate::games::tictactoe::{Board, Outcome, Player, Position, TokenUsage};
use crate::orchestrator::GameEvent;
use ratatui::layout::Rect;
use tracing::debug;

/// Main application state.
///
/// Mirrors the game from [`GameEvent`]s; the orchestrator task owns the
/// real [`crate::games::tictactoe::GameState`].
pub struct App {
    board: Board,
    human: Player,
    cursor: Position,
    status_message: String,
    awaiting_human: bool,
    outcome: Option<Outcome>,
    usage: TokenUsage,
    cell_areas: [Rect; 9],
}

impl App {
    /// Creates a new application for a human playing `human`.
    pub fn new(human: Player) -> Self {
        Self {
            board: Board::new(),
            human,
            cursor: Position::Center,
            status_message: "Waiting for game to start...".to_string(),
            awaiting_human: false,
            outcome: None,
            usage: TokenUsage::default(),
            cell_areas: [Rect::default(); 9],
        }
    }

    /// Board as last reported.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark the human plays.
    pub fn human(&self) -> Player {
        self.human
    }

    /// Highlighted cell.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True while the game waits on the human.
    pub fn awaiting_human(&self) -> bool {
        self.awaiting_human
    }

    /// Outcome once the game is over.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Token counters as of the last game over.
    pub fn usage(&self) -> &TokenUsage {
        &self.usage
    }

    /// Token counts for both sides, once the game is over.
    pub fn usage_summary(&self) -> Option<String> {
        self.outcome.as_ref().map(|_| {
            format!(
                "Tokens used by O: {} | X: {}",
                self.usage.of(Player::O),
                self.usage.of(Player::X)
            )
        })
    }

    /// Screen areas of the cells from the last draw.
    pub fn cell_areas(&self) -> &[Rect; 9] {
        &self.cell_areas
    }

    /// Records where the cells were drawn, for mouse hit-testing.
    pub fn set_cell_areas(&mut self, cell_areas: [Rect; 9]) {
        self.cell_areas = cell_areas;
    }

    /// Moves the highlight.
    pub fn set_cursor(&mut self, cursor: Position) {
        self.cursor = cursor;
    }

    /// Takes `pos` as the human's choice if it is their turn and the cell
    /// is free. Returns the position to forward to the game task.
    pub fn select(&mut self, pos: Position) -> Option<Position> {
        self.cursor = pos;
        if !self.awaiting_human {
            debug!(%pos, "Ignoring selection, not the human's turn");
            return None;
        }
        if !self.board.is_empty(pos) {
            self.status_message = format!("{} is already taken, pick another cell", pos);
            return None;
        }
        self.awaiting_human = false;
        Some(pos)
    }

    /// Handles a game event from the orchestrator.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::TurnStarted {
                player,
                name,
                attempt,
            } => {
                if player == self.human {
                    self.awaiting_human = true;
                    self.status_message = format!("Your turn ({})", player);
                } else if attempt > 1 {
                    self.status_message =
                        format!("{} is thinking... (attempt {})", name, attempt);
                } else {
                    self.status_message = format!("{} is thinking...", name);
                }
            }
            GameEvent::MoveRejected {
                player,
                name,
                reason,
                ..
            } => {
                self.status_message = if player == self.human {
                    format!("Illegal move: {}", reason)
                } else {
                    format!("{} move rejected: {}", name, reason)
                };
            }
            GameEvent::MoveMade {
                player,
                name,
                position,
                board,
            } => {
                debug!(player = %player, position = ?position, "Move applied to UI state");
                self.board = board;
                if player == self.human {
                    self.awaiting_human = false;
                }
                self.status_message = format!("{} played {}", name, position.label());
            }
            GameEvent::GameOver { outcome, usage } => {
                self.awaiting_human = false;
                self.status_message = format!(
                    "{}! Press 'r' to restart or 'q' to quit.",
                    self.describe(&outcome)
                );
                self.outcome = Some(outcome);
                self.usage = usage;
            }
        }
    }

    fn describe(&self, outcome: &Outcome) -> String {
        match outcome {
            Outcome::Winner(player) if *player == self.human => "You win".to_string(),
            Outcome::Winner(player) => format!("{} wins", player),
            Outcome::Draw => "Game ended in a draw".to_string(),
            other => other.to_string(),
        }
    }

    /// Restarts the game.
    pub fn restart(&mut self) {
        debug!("Restarting game");
        *self = Self {
            cell_areas: self.cell_areas,
            ..Self::new(self.human)
        };
        self.status_message = "Game restarted.".to_string();
    }
}
