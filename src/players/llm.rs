//! Automated player that asks a hosted model for its move.

use super::prompt::{self, SYSTEM_PROMPT};
use super::{MoveReply, MoveRequest, MoveSource, SourceError};
use crate::llm_client::{LlmClient, LlmConfig, LlmError};
use tracing::{debug, info, instrument, warn};

/// Player backed by an [`LlmClient`].
///
/// Each request renders the prompt, sends it, and parses the reply for a
/// `row,col` pair. Retrying is the turn loop's job.
#[derive(Debug)]
pub struct LlmPlayer {
    name: String,
    client: LlmClient,
}

impl LlmPlayer {
    /// Creates a new LLM player.
    #[instrument(skip(name, config), fields(player = %name, model = %config.model()))]
    pub fn new(name: String, config: LlmConfig) -> Result<Self, LlmError> {
        info!("Creating LLM player");
        Ok(Self {
            name,
            client: LlmClient::new(config)?,
        })
    }
}

#[async_trait::async_trait]
impl MoveSource for LlmPlayer {
    #[instrument(skip(self, request), fields(player = %self.name, mark = %request.mark, attempt = request.attempt))]
    async fn request_move(&mut self, request: &MoveRequest) -> Result<MoveReply, SourceError> {
        let system = prompt::render(SYSTEM_PROMPT, request.mark, &request.board);
        let user = prompt::turn_message(request.mark, &request.board, request.rejection.as_deref());

        let completion = self
            .client
            .generate(&system, &user)
            .await
            .map_err(|e| SourceError::Unavailable(e.message))?;

        match prompt::parse_coord(&completion.text) {
            Some(candidate) => {
                debug!(%candidate, tokens = completion.tokens, "Parsed move from reply");
                Ok(MoveReply {
                    candidate,
                    tokens: completion.tokens,
                })
            }
            None => {
                warn!(reply = %completion.text, "Reply held no move");
                Err(SourceError::Unparsable {
                    reply: completion.text,
                    tokens: completion.tokens,
                })
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
