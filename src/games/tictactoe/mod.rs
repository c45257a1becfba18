//! Tic-tac-toe: board, rules, and the turn state machine.

mod action;
mod game;
pub mod invariants;
mod phases;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use game::{GameState, PlacedMove, TokenUsage};
pub use phases::{ForfeitReason, Outcome, Phase};
pub use position::Position;
pub use types::{Board, GameStatus, GridError, Player, Square};
