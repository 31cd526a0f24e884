//! Mock implementations of the core ports
//!
//! All mocks are cheap to share behind an `Arc` and record what they saw so
//! tests can assert on it afterwards.

#![allow(clippy::missing_panics_doc)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use osdb_domain::{
    AccountIdentity, ApiToken, AuthStatus, ContainerKind, ItemEntry, Notification, OsdbError,
    Result,
};
use parking_lot::Mutex;
use serde_json::Value;

use crate::host_ports::{CredentialProvider, GameHost, HostUi};
use crate::transport_ports::{Transport, TransportResponse};

/// A request captured by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
enum Reply {
    Respond(TransportResponse),
    Fail(String),
}

/// Scripted [`Transport`].
///
/// Each path holds a queue of replies; the last reply repeats once the queue
/// is down to one. Unscripted paths answer `404`.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-utils")]
/// # {
/// use osdb_core::testing::MockTransport;
///
/// let transport = MockTransport::new();
/// transport.respond_sequence("/api/plugin/auth/test", vec![(401, ""), (200, "{}")]);
/// assert_eq!(transport.request_count("/api/plugin/auth/test"), 0);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    scripts: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every reply for `delay` after recording the request.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer `path` with `status` and `body`, replacing any earlier script.
    pub fn respond(&self, path: &str, status: u16, body: &str) {
        self.script(path, vec![Reply::Respond(TransportResponse::new(status, body))]);
    }

    /// Answer `path` with each reply in turn, then keep repeating the last.
    pub fn respond_sequence(&self, path: &str, replies: Vec<(u16, &str)>) {
        let replies = replies
            .into_iter()
            .map(|(status, body)| Reply::Respond(TransportResponse::new(status, body)))
            .collect();
        self.script(path, replies);
    }

    /// Fail every request to `path` as a transport error.
    pub fn fail(&self, path: &str, message: &str) {
        self.script(path, vec![Reply::Fail(message.to_string())]);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self, path: &str) -> usize {
        self.requests.lock().iter().filter(|r| r.path == path).count()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().clear();
    }

    fn script(&self, path: &str, replies: Vec<Reply>) {
        self.scripts.lock().insert(path.to_string(), replies.into());
    }

    fn next_reply(&self, path: &str) -> Reply {
        let mut scripts = self.scripts.lock();
        match scripts.get_mut(path) {
            Some(queue) if queue.len() > 1 => {
                queue.pop_front().unwrap_or(Reply::Respond(TransportResponse::new(404, "")))
            }
            Some(queue) => {
                queue.front().cloned().unwrap_or(Reply::Respond(TransportResponse::new(404, "")))
            }
            None => Reply::Respond(TransportResponse::new(404, "")),
        }
    }

    async fn exchange(&self, request: RecordedRequest) -> Result<TransportResponse> {
        let path = request.path.clone();
        self.requests.lock().push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.next_reply(&path) {
            Reply::Respond(response) => Ok(response),
            Reply::Fail(message) => Err(OsdbError::Network(message)),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, bearer: Option<&ApiToken>) -> Result<TransportResponse> {
        self.exchange(RecordedRequest {
            method: "GET",
            path: path.to_string(),
            bearer: bearer.map(|token| token.expose().to_string()),
            body: None,
        })
        .await
    }

    async fn post_json(
        &self,
        path: &str,
        bearer: &ApiToken,
        body: &Value,
    ) -> Result<TransportResponse> {
        self.exchange(RecordedRequest {
            method: "POST",
            path: path.to_string(),
            bearer: Some(bearer.expose().to_string()),
            body: Some(body.clone()),
        })
        .await
    }
}

/// Settable [`GameHost`].
///
/// Starts logged out with an unset identity and no containers loaded.
#[derive(Debug)]
pub struct MockGameHost {
    identity: Mutex<AccountIdentity>,
    containers: Mutex<HashMap<ContainerKind, Vec<ItemEntry>>>,
    logged_in: AtomicBool,
    identity_reads: AtomicUsize,
}

impl Default for MockGameHost {
    fn default() -> Self {
        Self {
            identity: Mutex::new(AccountIdentity::UNSET),
            containers: Mutex::new(HashMap::new()),
            logged_in: AtomicBool::new(false),
            identity_reads: AtomicUsize::new(0),
        }
    }
}

impl MockGameHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logged in as `identity`.
    pub fn logged_in_as(identity: i64) -> Self {
        let host = Self::new();
        host.set_identity(AccountIdentity::new(identity));
        host.set_logged_in(true);
        host
    }

    pub fn set_identity(&self, identity: AccountIdentity) {
        *self.identity.lock() = identity;
    }

    pub fn set_logged_in(&self, logged_in: bool) {
        self.logged_in.store(logged_in, Ordering::SeqCst);
    }

    pub fn set_container(&self, kind: ContainerKind, items: Vec<ItemEntry>) {
        self.containers.lock().insert(kind, items);
    }

    pub fn clear_container(&self, kind: ContainerKind) {
        self.containers.lock().remove(&kind);
    }

    /// How many times the connector asked for the identity.
    pub fn identity_reads(&self) -> usize {
        self.identity_reads.load(Ordering::SeqCst)
    }
}

impl GameHost for MockGameHost {
    fn account_identity(&self) -> AccountIdentity {
        self.identity_reads.fetch_add(1, Ordering::SeqCst);
        *self.identity.lock()
    }

    fn container_items(&self, kind: ContainerKind) -> Option<Vec<ItemEntry>> {
        self.containers.lock().get(&kind).cloned()
    }

    fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::SeqCst)
    }
}

/// [`HostUi`] that remembers everything it was shown.
#[derive(Debug, Default)]
pub struct RecordingUi {
    messages: Mutex<Vec<Notification>>,
    statuses: Mutex<Vec<AuthStatus>>,
    verify_clears: AtomicUsize,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Notification> {
        self.messages.lock().clone()
    }

    /// Messages as the player would read them.
    pub fn message_texts(&self) -> Vec<String> {
        self.messages.lock().iter().map(ToString::to_string).collect()
    }

    pub fn count(&self, notification: &Notification) -> usize {
        self.messages.lock().iter().filter(|m| *m == notification).count()
    }

    pub fn statuses(&self) -> Vec<AuthStatus> {
        self.statuses.lock().clone()
    }

    pub fn last_status(&self) -> Option<AuthStatus> {
        self.statuses.lock().last().copied()
    }

    pub fn verify_clears(&self) -> usize {
        self.verify_clears.load(Ordering::SeqCst)
    }
}

impl HostUi for RecordingUi {
    fn post_message(&self, notification: &Notification) {
        self.messages.lock().push(notification.clone());
    }

    fn publish_auth_status(&self, status: AuthStatus) {
        self.statuses.lock().push(status);
    }

    fn clear_verify_trigger(&self) {
        self.verify_clears.fetch_add(1, Ordering::SeqCst);
    }
}

/// [`CredentialProvider`] with a fixed answer.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Option<ApiToken>);

impl StaticCredentials {
    pub fn new(token: &str) -> Self {
        Self(Some(ApiToken::new(token)))
    }

    pub const fn none() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredentials {
    fn bearer(&self) -> Option<ApiToken> {
        self.0.clone()
    }
}
