// API client module: a small blocking HTTP client that talks to the
// Mastermind game server. Two endpoints, both POST, both JSON.
//
// The reqwest blocking client owns a connection pool and a background
// runtime thread. Both are released when the `ApiClient` is dropped, so
// whoever owns the client decides when teardown happens.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::io::Read;

use crate::config::Config;
use crate::error::{ApiError, ProtocolError};
use crate::guess::Guess;
use crate::protocol::{self, GameSession, GuessReply};

/// The two calls the game loop needs from a server. `ApiClient` is the
/// real implementation; tests substitute their own.
pub trait GameApi {
    /// `POST /game`: start a new game and return its id.
    fn create_game(&self) -> Result<GameSession, ApiError>;

    /// `POST /guess`: score one guess for `game_id`.
    fn submit_guess(&self, game_id: &str, guess: &Guess) -> Result<GuessReply, ApiError>;
}

impl<T: GameApi + ?Sized> GameApi for &T {
    fn create_game(&self) -> Result<GameSession, ApiError> {
        (**self).create_game()
    }

    fn submit_guess(&self, game_id: &str, guess: &Guess) -> Result<GuessReply, ApiError> {
        (**self).submit_guess(game_id, guess)
    }
}

/// Holds the reqwest blocking client and the settings it was built with.
pub struct ApiClient {
    client: Client,
    config: Config,
}

impl ApiClient {
    /// Create an ApiClient configured from `MASTERMIND_API_URL` or the
    /// public server. See [`Config::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::from_config(Config::from_env())
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        tracing::debug!(base_url = %config.base_url, "http client ready");
        Ok(ApiClient { client, config })
    }

    /// POST to `path` and return the raw response body. The status code is
    /// only logged: the guess endpoint reports failures in the body.
    fn post(&self, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>, ApiError> {
        let url = self.config.endpoint(path);
        let mut req = self.client.post(&url).header(ACCEPT, "application/json");
        req = match body {
            Some(bytes) => req.header(CONTENT_TYPE, "application/json").body(bytes),
            None => req.body(Vec::new()),
        };

        tracing::debug!(%url, "sending request");
        let res = req
            .send()
            .map_err(|e| ApiError::from_transport(e, self.config.timeout))?;
        let status = res.status();

        // Stop reading one byte past the cap; the rest is never downloaded.
        let limit = self.config.max_body_bytes;
        let mut buf = Vec::new();
        res.take(limit as u64 + 1)
            .read_to_end(&mut buf)
            .map_err(|e| ApiError::from_read(e, self.config.timeout))?;
        tracing::debug!(%url, %status, len = buf.len(), "response received");

        if buf.len() > limit {
            return Err(ProtocolError::BodyTooLarge { limit }.into());
        }
        Ok(buf)
    }
}

impl GameApi for ApiClient {
    fn create_game(&self) -> Result<GameSession, ApiError> {
        let body = self.post("/game", None)?;
        Ok(protocol::decode_game_start(&body)?)
    }

    fn submit_guess(&self, game_id: &str, guess: &Guess) -> Result<GuessReply, ApiError> {
        let payload = protocol::encode_guess(game_id, guess.digits())?;
        let body = self.post("/guess", Some(payload))?;
        Ok(protocol::decode_guess_response(&body)?)
    }
}

impl Drop for ApiClient {
    fn drop(&mut self) {
        tracing::debug!("releasing http client");
    }
}
