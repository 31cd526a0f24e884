//! reqwest-backed [`Transport`]

use async_trait::async_trait;
use osdb_core::transport_ports::{Transport, TransportResponse};
use osdb_domain::{ApiToken, ConnectorConfig, OsdbError, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use url::Url;

use super::client::HttpClient;
use crate::errors::InfraError;

/// Sends connector requests to one OldSchoolDB server.
#[derive(Clone)]
pub struct HttpTransport {
    client: HttpClient,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport for the configured server and timeout.
    ///
    /// # Errors
    /// `OsdbError::Config` when the server URL is not an http(s) URL or the
    /// client cannot be built.
    pub fn new(config: &ConnectorConfig) -> Result<Self> {
        let client = HttpClient::builder().timeout(config.request_timeout()).build()?;
        Self::with_client(&config.effective_server_url(), client)
    }

    /// Use an already configured client.
    pub fn with_client(base_url: &str, client: HttpClient) -> Result<Self> {
        let base_url = validate_base_url(base_url)?;
        Ok(Self { client, base_url })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<TransportResponse> {
        let response = self.client.send(builder).await?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| OsdbError::from(InfraError::from(err)))?;
        Ok(TransportResponse::new(status, body))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, bearer: Option<&ApiToken>) -> Result<TransportResponse> {
        let mut builder = self.client.request(Method::GET, self.url(path));
        if let Some(token) = bearer {
            builder = builder.header(AUTHORIZATION, token.bearer_header());
        }
        self.execute(builder).await
    }

    async fn post_json(
        &self,
        path: &str,
        bearer: &ApiToken,
        body: &Value,
    ) -> Result<TransportResponse> {
        let builder = self
            .client
            .request(Method::POST, self.url(path))
            .header(AUTHORIZATION, bearer.bearer_header())
            .json(body);
        self.execute(builder).await
    }
}

/// Require an absolute http(s) URL; returns it without a trailing slash.
pub(crate) fn validate_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|err| OsdbError::from(InfraError::from(err)))?;

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(trimmed.to_string()),
        scheme => Err(OsdbError::Config(format!(
            "server URL must be http(s) with a host, got {scheme}://"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use osdb_domain::constants::{AUTH_TEST_PATH, BANK_SYNC_PATH, CONNECTIVITY_PROBE_PATH};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;

    fn transport(server: &MockServer) -> HttpTransport {
        HttpTransport::with_client(&server.uri(), HttpClient::new().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn get_without_bearer_sends_no_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CONNECTIVITY_PROBE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let response = transport(&server).get(CONNECTIVITY_PROBE_PATH, None).await.unwrap();

        assert!(response.is_success());
        assert_eq!(response.body, "[]");
        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn get_with_bearer_sets_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(AUTH_TEST_PATH))
            .and(header("authorization", "Bearer tok-valid"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let token = ApiToken::new("tok-valid");
        let response = transport(&server).get(AUTH_TEST_PATH, Some(&token)).await.unwrap();

        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let server = MockServer::start().await;
        let payload = json!({ "account_hash": 1, "timestamp": 2, "items": [] });
        Mock::given(method("POST"))
            .and(path(BANK_SYNC_PATH))
            .and(header("content-type", "application/json"))
            .and(header_exists("user-agent"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let response = transport(&server)
            .post_json(BANK_SYNC_PATH, &ApiToken::new("tok"), &payload)
            .await
            .unwrap();

        assert_eq!(response.status, 201);
    }

    #[tokio::test]
    async fn error_status_is_a_response_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(|_: &Request| ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let response = transport(&server).get("/anything", None).await.unwrap();

        assert_eq!(response, TransportResponse::new(500, "boom"));
    }

    #[test]
    fn base_url_must_be_http() {
        let normalized = validate_base_url("https://api.example.com/").unwrap();
        assert_eq!(normalized, "https://api.example.com");
        assert!(validate_base_url("ftp://api.example.com").is_err());
        assert!(validate_base_url("localhost:3001").is_err());
        assert!(validate_base_url("").is_err());
    }

    #[test]
    fn localhost_switch_is_honoured() {
        let config = ConnectorConfig { use_localhost: true, ..Default::default() };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:3001");
    }

    #[test]
    fn paths_join_with_a_single_slash() {
        let client = HttpClient::new().unwrap();
        let transport = HttpTransport::with_client("http://host:1/prefix/", client).unwrap();
        assert_eq!(transport.url("/api/x"), "http://host:1/prefix/api/x");
    }
}
