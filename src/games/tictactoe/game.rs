//! Turn-taking state machine for tic-tac-toe.
//!
//! [`GameState`] owns the board and the current [`Phase`]. The only way the
//! board changes is [`GameState::accept`], which validates a candidate move,
//! applies it, and transitions to the next phase. Once the phase is
//! [`Phase::Terminal`] every further move is refused.

use super::invariants::{GameInvariants, InvariantSet};
use super::phases::{ForfeitReason, Outcome, Phase};
use super::rules::{self, terminal_status};
use super::{Board, GameStatus, Move, MoveError, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Cumulative token usage per player.
///
/// Incremented by move sources; never consulted by the turn logic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens spent on behalf of X.
    pub x: u64,
    /// Tokens spent on behalf of O.
    pub o: u64,
}

impl TokenUsage {
    /// Tokens spent by one player.
    pub fn of(&self, player: Player) -> u64 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    fn add(&mut self, player: Player, tokens: u64) {
        let counter = match player {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        };
        *counter = counter.saturating_add(tokens);
    }
}

/// A move that was accepted onto the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedMove {
    /// Who placed the mark.
    pub player: Player,
    /// Where it went.
    pub position: Position,
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    phase: Phase,
    last_player: Option<Player>,
    history: Vec<PlacedMove>,
    usage: TokenUsage,
}

impl GameState {
    /// Creates a new game: empty board, [`Player::FIRST`] to move, counters zero.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            phase: Phase::Turn(Player::FIRST),
            last_player: None,
            history: Vec::new(),
            usage: TokenUsage::default(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The player who moved last, `None` before the first move.
    pub fn last_player(&self) -> Option<Player> {
        self.last_player
    }

    /// Returns the move history.
    pub fn history(&self) -> &[PlacedMove] {
        &self.history
    }

    /// Returns the token counters.
    pub fn usage(&self) -> &TokenUsage {
        &self.usage
    }

    /// The player to move, `None` once the game is over.
    pub fn to_move(&self) -> Option<Player> {
        self.phase.to_move()
    }

    /// Status of the board as the rules see it.
    pub fn status(&self) -> GameStatus {
        terminal_status(&self.board)
    }

    /// Returns the outcome once the game is over.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.phase.outcome()
    }

    /// Returns true if the game is over.
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Validates and applies a move for the player whose turn it is.
    ///
    /// On success returns the new phase. On rejection the state is unchanged
    /// and the same player is still to move.
    #[instrument(skip(self), fields(candidate = %candidate, phase = ?self.phase))]
    pub fn accept(&mut self, candidate: Move) -> Result<&Phase, MoveError> {
        let Phase::Turn(player) = self.phase else {
            warn!("Move offered after game end");
            return Err(MoveError::GameOver);
        };

        let pos = rules::validate(&self.board, candidate)?;
        self.board = rules::apply(&self.board, pos, player);
        self.history.push(PlacedMove {
            player,
            position: pos,
        });
        self.last_player = Some(player);

        self.phase = match Outcome::from_status(terminal_status(&self.board)) {
            Some(outcome) => {
                info!(%outcome, moves = self.history.len(), "Game finished");
                Phase::Terminal(outcome)
            }
            None => Phase::Turn(player.opponent()),
        };

        debug_assert_eq!(GameInvariants::check_all(self), Ok(()));
        debug!(%player, %pos, next = ?self.phase, "Move applied");
        Ok(&self.phase)
    }

    /// Ends the game with `player` forfeiting.
    ///
    /// Does nothing if the game is already over.
    #[instrument(skip(self))]
    pub fn forfeit(&mut self, player: Player, reason: ForfeitReason) {
        if self.phase.is_terminal() {
            warn!("Forfeit ignored, game already over");
            return;
        }
        info!(%player, %reason, "Player forfeits");
        self.phase = Phase::Terminal(Outcome::Forfeit { player, reason });
    }

    /// Adds tokens to a player's usage counter.
    pub fn record_usage(&mut self, player: Player, tokens: u64) {
        self.usage.add(player, tokens);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
