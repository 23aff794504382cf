//! Process configuration.
//!
//! The only external configuration is the optional remote-enhancement
//! credential. It is read from the environment once at process start and
//! passed into the dispatcher explicitly; nothing re-reads the environment
//! afterwards. A missing credential is not an error, it just leaves the
//! remote path disabled.

use std::env;
use std::time::Duration;

/// Environment variable holding the remote-enhancement API token.
pub const API_TOKEN_VAR: &str = "HUGGINGFACE_API_KEY";

/// Immutable process configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Credential for the remote enhancement service; `None` disables it.
    pub api_token: Option<String>,
    /// Timeout for the remote enhancement request.
    pub remote_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_token: None,
            remote_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        let api_token = env::var(API_TOKEN_VAR).ok().filter(|t| !t.is_empty());
        Config {
            api_token,
            ..Config::default()
        }
    }
}
