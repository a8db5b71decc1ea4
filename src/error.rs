// Error types shared by the codec and the HTTP client. Invalid user
// input is not in here: a bad guess is a normal branch of the game loop.

use std::io;
use std::time::Duration;

/// Problems turning wire bytes into game values (or back).
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The body did not have the expected JSON shape.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// A guess reply that is neither feedback nor a server error object.
    #[error("Server returned an unreadable or unexpected response.")]
    UnreadableResponse,
}

/// Everything that can go wrong during one call to the game server.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The connection broke while the body was being read.
    #[error("failed to read response: {0}")]
    Read(#[source] io::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl ApiError {
    /// Sort a reqwest failure into timeout vs. everything else.
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(timeout)
        } else {
            ApiError::Network(err)
        }
    }

    /// Same sorting for errors raised while streaming the body, where
    /// reqwest hands back an `io::Error` (possibly wrapping its own).
    pub(crate) fn from_read(err: io::Error, timeout: Duration) -> Self {
        let inner_timeout = err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
            .is_some_and(reqwest::Error::is_timeout);
        if inner_timeout || err.kind() == io::ErrorKind::TimedOut {
            ApiError::Timeout(timeout)
        } else {
            ApiError::Read(err)
        }
    }
}
