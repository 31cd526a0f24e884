//! Port for the HTTP transport
//!
//! The core never talks to reqwest directly. `osdb-infra` provides the real
//! implementation; tests use `testing::MockTransport`.

use async_trait::async_trait;
use osdb_domain::{ApiToken, Result};
use serde_json::Value;

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl TransportResponse {
    /// Response with `status` and `body`.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    /// Status is in the 2xx range.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decode the body as JSON, `None` when it is not valid JSON.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// Body shortened for log output.
    pub fn body_excerpt(&self) -> &str {
        const MAX: usize = 256;
        match self.body.char_indices().nth(MAX) {
            Some((idx, _)) => &self.body[..idx],
            None => &self.body,
        }
    }
}

/// Sends requests to the OldSchoolDB service.
///
/// Paths are relative to the configured base URL. A non-2xx status is a
/// normal `Ok` response; `Err` is reserved for transport failures
/// (connection refused, timeout, unreadable body).
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET` with an optional bearer token.
    async fn get(&self, path: &str, bearer: Option<&ApiToken>) -> Result<TransportResponse>;

    /// `POST` a JSON body with a bearer token.
    async fn post_json(
        &self,
        path: &str,
        bearer: &ApiToken,
        body: &Value,
    ) -> Result<TransportResponse>;
}
