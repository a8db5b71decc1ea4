// Runtime settings for the game client. There is no config file: the
// defaults point at the public game server and a single environment
// variable can redirect the client (handy for a local server).

use std::time::Duration;

/// Public Mastermind server used when nothing overrides it.
pub const DEFAULT_BASE_URL: &str = "https://mastermind.darkube.app";

/// Each HTTP call gets its own budget of this many seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Responses larger than this are treated as unreadable.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024;

/// Environment variable that overrides [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "MASTERMIND_API_URL";

/// Where to reach the game server and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl Config {
    /// Build a config from `MASTERMIND_API_URL`, falling back to the
    /// public server when the variable is missing or blank.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::with_base_url(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Config {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join an endpoint path such as `/game` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
