//! Offline player that needs no backend.

use super::{MoveReply, MoveRequest, MoveSource, SourceError};
use crate::games::tictactoe::{Move, Position};
use std::time::Duration;
use tracing::debug;

/// Simple AI that picks the first empty square in row-major order.
pub struct SimpleAI {
    name: String,
    delay: Duration,
}

impl SimpleAI {
    /// Creates a new simple AI that answers immediately.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            delay: Duration::ZERO,
        }
    }

    /// Pauses before every answer so a human can follow along.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait::async_trait]
impl MoveSource for SimpleAI {
    async fn request_move(&mut self, request: &MoveRequest) -> Result<MoveReply, SourceError> {
        debug!(ai = %self.name, "AI making move");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let position = Position::valid_moves(&request.board)
            .first()
            .copied()
            .ok_or(SourceError::Closed)?;

        debug!(ai = %self.name, %position, "AI chose position");
        Ok(MoveReply::free(Move::from(position)))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Board, Player, Square};
    use std::time::Instant;

    fn request(board: Board) -> MoveRequest {
        MoveRequest {
            board,
            mark: Player::O,
            attempt: 1,
            rejection: None,
        }
    }

    #[tokio::test]
    async fn test_picks_first_empty_cell() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        let mut ai = SimpleAI::new("simple");

        let reply = ai.request_move(&request(board)).await.unwrap();
        assert_eq!(reply.candidate, Move::new(0, 1));
        assert_eq!(reply.tokens, 0);
    }

    #[tokio::test]
    async fn test_delay_holds_the_answer() {
        let mut ai = SimpleAI::new("simple").with_delay(Duration::from_millis(30));

        let started = Instant::now();
        ai.request_move(&request(Board::new())).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
