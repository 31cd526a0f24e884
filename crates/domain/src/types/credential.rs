//! Bearer credential configured by the user

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::TOKEN_PREVIEW_CHARS;

/// API token pasted into the plugin settings.
///
/// `Debug` never prints the secret; use [`ApiToken::preview`] for log output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ApiToken(String);

impl ApiToken {
    /// Wrap `token`, trimming surrounding whitespace.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    /// Empty or whitespace-only tokens count as "not configured".
    pub fn is_configured(&self) -> bool {
        !self.0.trim().is_empty()
    }

    /// The raw token, for building requests.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First few characters followed by an ellipsis, or `"empty"`.
    pub fn preview(&self) -> String {
        if !self.is_configured() {
            return "empty".to_string();
        }
        let head: String = self.0.chars().take(TOKEN_PREVIEW_CHARS).collect();
        format!("{head}...")
    }

    /// `Authorization` header value.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiToken").field("len", &self.len()).finish_non_exhaustive()
    }
}

impl From<&str> for ApiToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ApiToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<ApiToken> for String {
    fn from(value: ApiToken) -> Self {
        value.0
    }
}
