use std::sync::Arc;
use std::time::Duration;

use osdb_domain::ConnectorConfig;
use osdb_infra::HttpTransport;
use wiremock::MockServer;

pub const VALID_AUTH_BODY: &str = r#"{"user":{"email":"a@b.com"},"token":{"name":"t1"}}"#;

/// Transport pointed at a wiremock server with a short timeout.
pub fn transport_for(server: &MockServer) -> Arc<HttpTransport> {
    let config = ConnectorConfig {
        server_url: server.uri(),
        request_timeout_secs: 2,
        ..Default::default()
    };
    Arc::new(HttpTransport::new(&config).expect("transport should build"))
}

pub const OVERLAP_DELAY: Duration = Duration::from_millis(200);
