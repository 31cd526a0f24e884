//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use osdb_domain::{ApiToken, OsdbError};
use osdb_infra::config;
use osdb_infra::HttpTransport;
use tempfile::TempDir;

#[test]
fn test_load_config_from_toml_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("osdb.toml");
    let mut file = std::fs::File::create(&path).expect("create config");
    writeln!(
        file,
        r#"
server_url = "https://api.oldschooldb.com/"
api_token = "tok-from-file"
greeting = "Welcome back"
request_timeout_secs = 10
"#
    )
    .expect("write config");

    let config = config::load_from_file(Some(path)).expect("config should load");

    assert_eq!(config.effective_server_url(), "https://api.oldschooldb.com");
    assert_eq!(config.api_token, ApiToken::new("tok-from-file"));
    assert_eq!(config.greeting, "Welcome back");
    assert!(!config.use_localhost);

    let transport = HttpTransport::new(&config).expect("transport from loaded config");
    assert_eq!(transport.base_url(), "https://api.oldschooldb.com");
}

#[test]
fn test_load_config_from_json_file_with_minimal_fields() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "api_token": "tok" }"#).expect("write config");

    let config = config::load_from_file(Some(path)).expect("config should load");

    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.effective_server_url(), "https://api.oldschooldb.com");
}

#[test]
fn test_invalid_json_is_a_config_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("osdb.json");
    std::fs::write(&path, "{ not json").expect("write config");

    let err = config::load_from_file(Some(path)).unwrap_err();

    assert!(matches!(err, OsdbError::Config(ref msg) if msg.contains("JSON")));
}

#[test]
fn test_non_http_server_url_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("osdb.toml");
    std::fs::write(&path, "server_url = \"ftp://files.example.com\"\n").expect("write config");

    let err = config::load_from_file(Some(path)).unwrap_err();

    assert!(matches!(err, OsdbError::Config(_)));
}
