//! Human player fed by the terminal UI.

use super::{MoveReply, MoveRequest, MoveSource, SourceError};
use crate::games::tictactoe::{Move, Position};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Human player whose moves arrive over a channel from the UI loop.
///
/// The UI translates clicks and key presses into [`Position`]s and only
/// forwards them while this player is being asked for a move.
pub struct HumanPlayer {
    name: String,
    input_rx: mpsc::UnboundedReceiver<Position>,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input_rx: mpsc::UnboundedReceiver<Position>) -> Self {
        Self {
            name: name.into(),
            input_rx,
        }
    }
}

#[async_trait::async_trait]
impl MoveSource for HumanPlayer {
    #[instrument(skip(self, request), fields(player = %self.name, attempt = request.attempt))]
    async fn request_move(&mut self, request: &MoveRequest) -> Result<MoveReply, SourceError> {
        debug!("Waiting for human input");
        match self.input_rx.recv().await {
            Some(position) => {
                debug!(%position, "Human picked a cell");
                Ok(MoveReply::free(Move::from(position)))
            }
            None => {
                info!("Input channel closed");
                Err(SourceError::Closed)
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
