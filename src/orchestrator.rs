//! Game orchestration between two move sources.
//!
//! The [`Orchestrator`] owns the single [`GameState`] and asks the active
//! side for moves one at a time. Rejected or unreadable moves are retried
//! against the same side up to the attempt budget; a side that exhausts it
//! forfeits.

use crate::games::tictactoe::{
    Board, ForfeitReason, GameState, Outcome, Phase, Player, Position, TokenUsage,
};
use crate::players::{MoveRequest, MoveSource, SourceError};
use crate::telemetry::{MoveTrace, Telemetry};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Default number of attempts a side gets per turn.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A side is being asked for a move.
    TurnStarted {
        /// Mark to play.
        player: Player,
        /// Source name.
        name: String,
        /// 1-based attempt within the turn.
        attempt: u32,
    },
    /// An attempt produced no legal move.
    MoveRejected {
        /// Mark that tried.
        player: Player,
        /// Source name.
        name: String,
        /// Why it was refused.
        reason: String,
        /// 1-based attempt within the turn.
        attempt: u32,
    },
    /// A move was accepted.
    MoveMade {
        /// Mark placed.
        player: Player,
        /// Source name.
        name: String,
        /// Cell taken.
        position: Position,
        /// Board after the move.
        board: Board,
    },
    /// Game ended.
    GameOver {
        /// How it ended.
        outcome: Outcome,
        /// Final token counters.
        usage: TokenUsage,
    },
}

enum Failure {
    Invalid,
    Unavailable(String),
}

/// Orchestrates gameplay between two players.
pub struct Orchestrator {
    state: GameState,
    player_one: Box<dyn MoveSource>,
    player_two: Box<dyn MoveSource>,
    max_attempts: u32,
    event_tx: Option<mpsc::UnboundedSender<GameEvent>>,
    telemetry: Telemetry,
}

impl Orchestrator {
    /// Creates a new orchestrator. `player_one` moves first and plays
    /// [`Player::FIRST`].
    pub fn new(player_one: Box<dyn MoveSource>, player_two: Box<dyn MoveSource>) -> Self {
        Self {
            state: GameState::new(),
            player_one,
            player_two,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            event_tx: None,
            telemetry: Telemetry::disabled(),
        }
    }

    /// Sets the per-turn attempt budget (at least 1).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Streams [`GameEvent`]s to `event_tx`.
    pub fn with_events(mut self, event_tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    /// Sends per-move trace events through `telemetry`.
    pub fn with_telemetry(mut self, telemetry: Telemetry) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Display name of the side playing `player`.
    pub fn name_of(&self, player: Player) -> &str {
        self.source(player).name()
    }

    fn source(&self, player: Player) -> &dyn MoveSource {
        if player == Player::FIRST {
            self.player_one.as_ref()
        } else {
            self.player_two.as_ref()
        }
    }

    fn source_mut(&mut self, player: Player) -> &mut Box<dyn MoveSource> {
        if player == Player::FIRST {
            &mut self.player_one
        } else {
            &mut self.player_two
        }
    }

    /// Runs the game loop until the game is over and returns the outcome.
    ///
    /// Never fails: bad moves and dead backends end the game as a forfeit.
    #[instrument(skip(self), fields(trace_id = %self.telemetry.trace_id()))]
    pub async fn run(&mut self) -> Outcome {
        info!(
            player_one = %self.player_one.name(),
            player_two = %self.player_two.name(),
            max_attempts = self.max_attempts,
            "Starting game orchestration"
        );

        let outcome = loop {
            match self.state.phase().clone() {
                Phase::Terminal(outcome) => break outcome,
                Phase::Turn(player) => self.play_turn(player).await,
            }
        };

        let usage = *self.state.usage();
        self.telemetry.record_outcome(&outcome, &usage).await;
        self.emit(GameEvent::GameOver {
            outcome: outcome.clone(),
            usage,
        });
        info!(%outcome, tokens_o = usage.o, tokens_x = usage.x, "Game over");
        outcome
    }

    /// Asks `player` for moves until one is accepted or the budget runs out.
    #[instrument(skip(self))]
    async fn play_turn(&mut self, player: Player) {
        let name = self.name_of(player).to_string();
        let tokens_before = self.state.usage().of(player);
        let mut rejection: Option<String> = None;
        let mut failure = Failure::Invalid;

        for attempt in 1..=self.max_attempts {
            self.emit(GameEvent::TurnStarted {
                player,
                name: name.clone(),
                attempt,
            });

            let request = MoveRequest {
                board: *self.state.board(),
                mark: player,
                attempt,
                rejection: rejection.clone(),
            };
            debug!(attempt, "Requesting move");
            let result = self.source_mut(player).request_move(&request).await;

            let reason = match result {
                Ok(reply) => {
                    self.state.record_usage(player, reply.tokens);
                    match self.state.accept(reply.candidate) {
                        Ok(_) => {
                            self.after_move(player, &name, tokens_before).await;
                            return;
                        }
                        Err(e) => {
                            failure = Failure::Invalid;
                            e.to_string()
                        }
                    }
                }
                Err(SourceError::Unparsable { reply, tokens }) => {
                    self.state.record_usage(player, tokens);
                    failure = Failure::Invalid;
                    format!("could not read a move from {:?}", reply)
                }
                Err(SourceError::Unavailable(message)) => {
                    failure = Failure::Unavailable(message.clone());
                    message
                }
                Err(SourceError::Closed) => {
                    self.state.forfeit(player, ForfeitReason::Abandoned);
                    return;
                }
            };

            warn!(attempt, max_attempts = self.max_attempts, %reason, "Move rejected");
            self.emit(GameEvent::MoveRejected {
                player,
                name: name.clone(),
                reason: reason.clone(),
                attempt,
            });
            rejection = Some(reason);
        }

        let reason = match failure {
            Failure::Invalid => ForfeitReason::InvalidMoves {
                attempts: self.max_attempts,
            },
            Failure::Unavailable(message) => ForfeitReason::SourceUnavailable(message),
        };
        self.state.forfeit(player, reason);
    }

    async fn after_move(&mut self, player: Player, name: &str, tokens_before: u64) {
        let Some(placed) = self.state.history().last().copied() else {
            return;
        };
        let board = *self.state.board();

        let trace = MoveTrace::new(
            self.state.history().len(),
            player,
            name.to_string(),
            placed.position,
            board.to_grid(),
            self.state.usage().of(player) - tokens_before,
        );
        self.telemetry.record_move(&trace).await;

        self.emit(GameEvent::MoveMade {
            player,
            name: name.to_string(),
            position: placed.position,
            board,
        });
    }

    fn emit(&self, event: GameEvent) {
        if let Some(tx) = &self.event_tx
            && tx.send(event).is_err()
        {
            debug!("Event receiver dropped");
        }
    }
}
