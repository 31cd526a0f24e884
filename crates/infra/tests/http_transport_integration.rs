//! Integration tests for the core services over the real HTTP transport
//!
//! **Coverage:**
//! - Authentication against a wiremock auth endpoint (success, malformed,
//!   rejected, overlapping attempts)
//! - Bank sync wire format and bearer header
//! - Overlapping syncs of one kind collapse to a single request
//! - Timeouts surface as failures, never panics

#[path = "support.rs"]
mod support;

use std::sync::Arc;
use std::time::Duration;

use osdb_core::{AuthFailure, AuthResult, SessionManager, SkipReason, SyncDispatcher, SyncOutcome};
use osdb_domain::constants::{AUTH_TEST_PATH, BANK_SYNC_PATH, CONNECTIVITY_PROBE_PATH};
use osdb_domain::{AccountIdentity, ApiToken, ItemEntry, SessionState};
use support::{transport_for, OVERLAP_DELAY, VALID_AUTH_BODY};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_auth(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET")).and(path(AUTH_TEST_PATH)).respond_with(template).mount(server).await;
}

async fn authenticated_session(server: &MockServer) -> SessionManager {
    mount_auth(server, ResponseTemplate::new(200).set_body_string(VALID_AUTH_BODY)).await;
    let session = SessionManager::new(transport_for(server));
    assert!(session.authenticate(ApiToken::new("tok-valid")).await.is_success());
    session
}

#[tokio::test]
async fn connectivity_probe_is_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONNECTIVITY_PROBE_PATH))
        .and(header("user-agent", "OldSchoolDB-Plugin/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionManager::new(transport_for(&server));

    assert!(session.test_connectivity().await);
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn valid_token_authenticates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(AUTH_TEST_PATH))
        .and(header("authorization", "Bearer tok-valid"))
        .respond_with(ResponseTemplate::new(200).set_body_string(VALID_AUTH_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionManager::new(transport_for(&server));
    let result = session.authenticate(ApiToken::new("tok-valid")).await;

    assert_eq!(
        result,
        AuthResult::Authenticated {
            user_label: Some("a@b.com".into()),
            token_label: Some("t1".into())
        }
    );
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn user_only_body_is_rejected() {
    let server = MockServer::start().await;
    mount_auth(&server, ResponseTemplate::new(200).set_body_string(r#"{"user":{}}"#)).await;

    let session = SessionManager::new(transport_for(&server));
    let result = session.authenticate(ApiToken::new("tok")).await;

    assert_eq!(result, AuthResult::Rejected(AuthFailure::MalformedBody));
    assert_eq!(session.state(), SessionState::Failed);
}

#[tokio::test]
async fn unauthorized_is_rejected_with_status() {
    let server = MockServer::start().await;
    mount_auth(&server, ResponseTemplate::new(401)).await;

    let session = SessionManager::new(transport_for(&server));
    let result = session.authenticate(ApiToken::new("tok-bad")).await;

    assert_eq!(result, AuthResult::Rejected(AuthFailure::Status(401)));
}

#[tokio::test]
async fn overlapping_authentications_hit_the_server_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(AUTH_TEST_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(VALID_AUTH_BODY).set_delay(OVERLAP_DELAY),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionManager::new(transport_for(&server));
    let (first, second) = tokio::join!(
        session.authenticate(ApiToken::new("tok")),
        session.authenticate(ApiToken::new("tok"))
    );

    assert!(first.is_success());
    assert_eq!(second, AuthResult::AlreadyInFlight);
}

#[tokio::test]
async fn bank_sync_posts_envelope_with_bearer() {
    let server = MockServer::start().await;
    let session = authenticated_session(&server).await;
    Mock::given(method("POST"))
        .and(path(BANK_SYNC_PATH))
        .and(header("authorization", "Bearer tok-valid"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = SyncDispatcher::new(transport_for(&server), Arc::new(session));
    let outcome = dispatcher
        .sync_bank(
            AccountIdentity::new(123_456_789),
            &[ItemEntry::new(995, 100), ItemEntry::new(-1, 0)],
        )
        .await;

    assert_eq!(outcome, SyncOutcome::Sent { item_count: 1 });
    let requests = server.received_requests().await.unwrap();
    let post = requests.iter().find(|r| r.url.path() == BANK_SYNC_PATH).unwrap();
    let body: serde_json::Value = serde_json::from_slice(&post.body).unwrap();
    assert_eq!(body["account_hash"], 123_456_789);
    assert_eq!(body["items"], serde_json::json!([{ "item_id": 995, "quantity": 100 }]));
    assert!(body["timestamp"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn overlapping_bank_syncs_post_once() {
    let server = MockServer::start().await;
    let session = authenticated_session(&server).await;
    Mock::given(method("POST"))
        .and(path(BANK_SYNC_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(OVERLAP_DELAY))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = SyncDispatcher::new(transport_for(&server), Arc::new(session));
    let items = [ItemEntry::new(995, 100)];
    let identity = AccountIdentity::new(1);
    let (first, second) = tokio::join!(
        dispatcher.sync_bank(identity, &items),
        dispatcher.sync_bank(identity, &items)
    );

    assert!(first.is_success());
    assert_eq!(second, SyncOutcome::Skipped(SkipReason::AlreadyPending));
}

#[tokio::test]
async fn slow_sync_times_out_as_failure() {
    let server = MockServer::start().await;
    let session = authenticated_session(&server).await;
    Mock::given(method("POST"))
        .and(path(BANK_SYNC_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let dispatcher = SyncDispatcher::new(transport_for(&server), Arc::new(session));
    let outcome = dispatcher.sync_bank(AccountIdentity::new(1), &[]).await;

    assert!(matches!(outcome, SyncOutcome::Failed(_)));
    assert!(!dispatcher.is_pending(osdb_domain::ResourceKind::Bank));
}
