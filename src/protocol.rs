// Wire format of the Mastermind HTTP API. The guess endpoint answers
// with either feedback or an error object on the same status path, so
// the reply is decoded by trying each known shape in a fixed order.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::guess::CODE_LENGTH;

/// The one game this process plays. Created at startup, never changed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameSession {
    pub game_id: String,
}

/// Body of `POST /guess`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessRequest {
    pub game_id: String,
    pub guess: String,
}

/// Peg counts for one guess, as scored by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GuessFeedback {
    pub black: u32,
    pub white: u32,
}

impl GuessFeedback {
    /// `black + white` fits in a code of [`CODE_LENGTH`] digits.
    pub fn is_possible(&self) -> bool {
        self.black
            .checked_add(self.white)
            .is_some_and(|total| total as usize <= CODE_LENGTH)
    }
}

/// Structured failure reported by the guess endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerError {
    #[serde(rename = "error")]
    pub message: String,
}

/// What a guess reply decodes to when it is readable at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessReply {
    Feedback(GuessFeedback),
    Rejected(ServerError),
}

/// Serialize a guess as `{"game_id": .., "guess": ..}`, with the digits
/// concatenated into a single string.
pub fn encode_guess(game_id: &str, digits: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let guess: String = digits.iter().map(u8::to_string).collect();
    let request = GuessRequest {
        game_id: game_id.to_string(),
        guess,
    };
    serde_json::to_vec(&request).map_err(ProtocolError::Encode)
}

/// Parse the create-game response.
pub fn decode_game_start(body: &[u8]) -> Result<GameSession, ProtocolError> {
    serde_json::from_slice(body).map_err(ProtocolError::Decode)
}

/// Parse a guess response: feedback first, then the error shape.
/// Feedback with more than four pegs in total is unreadable.
pub fn decode_guess_response(body: &[u8]) -> Result<GuessReply, ProtocolError> {
    match serde_json::from_slice::<GuessFeedback>(body) {
        Ok(feedback) if feedback.is_possible() => return Ok(GuessReply::Feedback(feedback)),
        Ok(feedback) => {
            tracing::debug!(?feedback, "guess reply has impossible peg counts");
            return Err(ProtocolError::UnreadableResponse);
        }
        Err(e) => tracing::debug!("guess reply is not feedback: {e}"),
    }
    match serde_json::from_slice::<ServerError>(body) {
        Ok(err) => Ok(GuessReply::Rejected(err)),
        Err(e) => {
            tracing::debug!("guess reply is not a server error either: {e}");
            Err(ProtocolError::UnreadableResponse)
        }
    }
}
