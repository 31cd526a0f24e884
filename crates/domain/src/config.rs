//! Connector configuration
//!
//! Mirrors the plugin's settings panel. Loading from env/files lives in
//! `osdb-infra::config`; this module only defines the shape and defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GREETING, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_URL, LOCALHOST_SERVER_URL,
};
use crate::ApiToken;

/// Settings consumed by the connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Base URL of the OldSchoolDB API.
    pub server_url: String,
    /// Bearer token; empty until the user pastes one.
    pub api_token: ApiToken,
    /// Chat message shown on every login.
    pub greeting: String,
    /// Manual "verify now" checkbox.
    pub verify_token: bool,
    /// Development switch that overrides `server_url` with localhost.
    pub use_localhost: bool,
    pub request_timeout_secs: u64,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            api_token: ApiToken::default(),
            greeting: DEFAULT_GREETING.to_string(),
            verify_token: false,
            use_localhost: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ConnectorConfig {
    /// Base URL requests are actually sent to, without a trailing slash.
    pub fn effective_server_url(&self) -> String {
        if self.use_localhost {
            return LOCALHOST_SERVER_URL.to_string();
        }
        self.server_url.trim().trim_end_matches('/').to_string()
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
