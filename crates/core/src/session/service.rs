//! Session manager - owns the credential and the auth state machine

use std::sync::Arc;

use osdb_domain::constants::{AUTH_TEST_PATH, CONNECTIVITY_PROBE_PATH, TOKEN_HELP_URL};
use osdb_domain::{ApiToken, SessionState};
use parking_lot::Mutex;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::host_ports::CredentialProvider;
use crate::transport_ports::{Transport, TransportResponse};

/// Why an authentication attempt did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("no API token configured")]
    MissingCredential,

    #[error("auth request failed: {0}")]
    Transport(String),

    #[error("server rejected token with status {0}")]
    Status(u16),

    #[error("auth response is missing user/token details")]
    MalformedBody,
}

/// Outcome of [`SessionManager::authenticate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    Authenticated { user_label: Option<String>, token_label: Option<String> },
    Rejected(AuthFailure),
    /// Another attempt was already running; no request was sent.
    AlreadyInFlight,
    /// The session already holds an accepted token; no request was sent.
    AlreadyAuthenticated,
    /// The session was reset while this attempt was in flight; its result
    /// was discarded.
    Superseded,
}

impl AuthResult {
    /// True only for [`AuthResult::Authenticated`].
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// `user.email` from a successful response.
    pub fn user_label(&self) -> Option<&str> {
        match self {
            Self::Authenticated { user_label, .. } => user_label.as_deref(),
            _ => None,
        }
    }

    /// `token.name` from a successful response.
    pub fn token_label(&self) -> Option<&str> {
        match self {
            Self::Authenticated { token_label, .. } => token_label.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct SessionInner {
    state: SessionState,
    credential: Option<ApiToken>,
    /// Bumped by `reset`; attempts started in an older epoch are discarded.
    epoch: u64,
}

/// Authentication state machine.
///
/// Cloning is cheap and every clone shares the same state. The mutex is
/// never held across an `.await`.
#[derive(Clone)]
pub struct SessionManager {
    transport: Arc<dyn Transport>,
    inner: Arc<Mutex<SessionInner>>,
}

impl SessionManager {
    /// Create an unauthenticated session over `transport`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport, inner: Arc::new(Mutex::new(SessionInner::default())) }
    }

    /// Current state of the auth state machine.
    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    /// True while a token is accepted and available for syncs.
    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Probe the unauthenticated mappings endpoint.
    ///
    /// Any transport failure counts as unreachable.
    #[instrument(skip(self))]
    pub async fn test_connectivity(&self) -> bool {
        match self.transport.get(CONNECTIVITY_PROBE_PATH, None).await {
            Ok(response) => {
                let connected = response.is_success();
                info!(connected, status = response.status, "Server connection test");
                connected
            }
            Err(err) => {
                warn!(error = %err, "Server connection test failed");
                false
            }
        }
    }

    /// Validate `credential` against the auth test endpoint.
    ///
    /// Equivalent to [`SessionManager::begin`] followed by
    /// [`PendingAuth::complete`].
    pub async fn authenticate(&self, credential: ApiToken) -> AuthResult {
        match self.begin(credential) {
            Ok(pending) => pending.complete().await,
            Err(result) => result,
        }
    }

    /// Enter `Authenticating` synchronously and hand back the request to run.
    ///
    /// Returns `Err` without touching state when the credential is blank,
    /// another attempt is still in flight, or the session is already
    /// authenticated. Changing the token goes through [`SessionManager::reset`]
    /// first.
    pub fn begin(&self, credential: ApiToken) -> Result<PendingAuth, AuthResult> {
        if !credential.is_configured() {
            info!(help_url = TOKEN_HELP_URL, "No API token configured; skipping authentication");
            return Err(AuthResult::Rejected(AuthFailure::MissingCredential));
        }

        let mut inner = self.inner.lock();
        match inner.state {
            SessionState::Authenticating => {
                debug!("Authentication already in flight; ignoring duplicate trigger");
                return Err(AuthResult::AlreadyInFlight);
            }
            SessionState::Authenticated => {
                debug!("Session already authenticated; ignoring trigger");
                return Err(AuthResult::AlreadyAuthenticated);
            }
            SessionState::Unauthenticated | SessionState::Failed => {}
        }

        inner.state = SessionState::Authenticating;
        inner.credential = None;
        debug!(token_len = credential.len(), epoch = inner.epoch, "Authentication started");

        Ok(PendingAuth {
            transport: Arc::clone(&self.transport),
            inner: Arc::clone(&self.inner),
            credential,
            epoch: inner.epoch,
        })
    }

    /// Forget the credential and return to `Unauthenticated`.
    ///
    /// An attempt still in flight will report [`AuthResult::Superseded`].
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.state = SessionState::Unauthenticated;
        inner.credential = None;
        inner.epoch = inner.epoch.wrapping_add(1);
        debug!(epoch = inner.epoch, "Session reset");
    }
}

impl CredentialProvider for SessionManager {
    fn bearer(&self) -> Option<ApiToken> {
        let inner = self.inner.lock();
        match inner.state {
            SessionState::Authenticated => inner.credential.clone(),
            _ => None,
        }
    }
}

/// An authentication request that has claimed the `Authenticating` state.
#[must_use = "the session stays in Authenticating until the attempt completes"]
pub struct PendingAuth {
    transport: Arc<dyn Transport>,
    inner: Arc<Mutex<SessionInner>>,
    credential: ApiToken,
    epoch: u64,
}

impl PendingAuth {
    /// Send the auth probe and settle the session state.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub async fn complete(self) -> AuthResult {
        let verdict = match self.transport.get(AUTH_TEST_PATH, Some(&self.credential)).await {
            Ok(response) if response.is_success() => parse_auth_response(&response),
            Ok(response) => {
                warn!(
                    status = response.status,
                    body = response.body_excerpt(),
                    "Token authentication failed"
                );
                Err(AuthFailure::Status(response.status))
            }
            Err(err) => {
                warn!(error = %err, "Token authentication request failed");
                Err(AuthFailure::Transport(err.to_string()))
            }
        };

        let mut inner = self.inner.lock();
        if inner.epoch != self.epoch {
            debug!(
                current_epoch = inner.epoch,
                "Session reset during authentication; discarding result"
            );
            return AuthResult::Superseded;
        }

        match verdict {
            Ok((user_label, token_label)) => {
                info!(
                    user = user_label.as_deref().unwrap_or("unknown"),
                    token = token_label.as_deref().unwrap_or("unknown"),
                    "Successfully authenticated with OldSchoolDB"
                );
                inner.state = SessionState::Authenticated;
                inner.credential = Some(self.credential);
                AuthResult::Authenticated { user_label, token_label }
            }
            Err(failure) => {
                warn!(reason = %failure, help_url = TOKEN_HELP_URL, "Authentication rejected");
                inner.state = SessionState::Failed;
                inner.credential = None;
                AuthResult::Rejected(failure)
            }
        }
    }
}

/// Require `{"user": {...}, "token": {...}}`; labels are best effort.
fn parse_auth_response(
    response: &TransportResponse,
) -> Result<(Option<String>, Option<String>), AuthFailure> {
    let body = response.json().ok_or(AuthFailure::MalformedBody)?;
    let user = body.get("user").filter(|v| v.is_object()).ok_or(AuthFailure::MalformedBody)?;
    let token = body.get("token").filter(|v| v.is_object()).ok_or(AuthFailure::MalformedBody)?;

    let label = |obj: &Value, key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);
    Ok((label(user, "email"), label(token, "name")))
}
