//! Connector defaults.
//!
//! The default User-Agent and timeouts are plain configuration handed to a
//! `Connector`, never process-wide state. Values can come from code, from a
//! JSON document, or from `COURIER_*` environment variables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// User-Agent sent when the caller does not provide one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/74.0.3729.169 Safari/537.36";

/// Connect and read timeout applied when a `Request` leaves them unset.
pub const DEFAULT_TIMEOUT_MS: u64 = 12_500;

pub const ENV_USER_AGENT: &str = "COURIER_USER_AGENT";
pub const ENV_CONNECT_TIMEOUT_MS: &str = "COURIER_CONNECT_TIMEOUT_MS";
pub const ENV_READ_TIMEOUT_MS: &str = "COURIER_READ_TIMEOUT_MS";

/// Defaults applied by `Connector` to every exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    pub user_agent: String,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout_ms: DEFAULT_TIMEOUT_MS,
            read_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ConnectorConfig {
    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        serde_json::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }

    /// Defaults overridden by whichever `COURIER_*` variables are set.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut config = Self::default();
        if let Some(user_agent) = lookup(ENV_USER_AGENT) {
            config.user_agent = user_agent;
        }
        if let Some(raw) = lookup(ENV_CONNECT_TIMEOUT_MS) {
            config.connect_timeout_ms = parse_millis(ENV_CONNECT_TIMEOUT_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_READ_TIMEOUT_MS) {
            config.read_timeout_ms = parse_millis(ENV_READ_TIMEOUT_MS, &raw)?;
        }
        Ok(config)
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<u64, Error> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key} must be a whole number of milliseconds, got {raw:?}")))
}
