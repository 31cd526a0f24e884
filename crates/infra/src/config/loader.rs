//! Configuration loader
//!
//! Loads connector configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Loads a `.env` file into the environment when one exists
//! 2. Attempts to load from environment variables
//! 3. If `OSDB_API_TOKEN` is not set, falls back to loading from file
//! 4. Probes multiple paths for config files
//! 5. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `OSDB_API_TOKEN`: API token (required for the environment source)
//! - `OSDB_SERVER_URL`: Base URL of the OldSchoolDB API
//! - `OSDB_GREETING`: Chat message shown on login
//! - `OSDB_USE_LOCALHOST`: Send requests to `http://localhost:3001` (true/false)
//! - `OSDB_REQUEST_TIMEOUT_SECS`: HTTP request timeout in seconds
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./osdb.toml`, `./osdb.json`
//! 2. `./config.toml`, `./config.json`
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use osdb_domain::{ApiToken, ConnectorConfig, OsdbError, Result};

use crate::http::transport::validate_base_url;

const CONFIG_FILE_NAMES: [&str; 4] = ["osdb.toml", "osdb.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables (after reading `.env`).
/// If the token variable is missing, falls back to a config file.
///
/// # Errors
/// Returns `OsdbError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The server URL is not an http(s) URL
pub fn load() -> Result<ConnectorConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "Ignoring unreadable .env file"),
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `OSDB_API_TOKEN` must be present; every other variable falls back to
/// its default.
///
/// # Errors
/// Returns `OsdbError::Config` if the token is missing or a value is
/// invalid.
pub fn load_from_env() -> Result<ConnectorConfig> {
    let defaults = ConnectorConfig::default();

    let api_token = ApiToken::new(env_var("OSDB_API_TOKEN")?);
    let server_url = std::env::var("OSDB_SERVER_URL").unwrap_or(defaults.server_url);
    let greeting = std::env::var("OSDB_GREETING").unwrap_or(defaults.greeting);
    let use_localhost = env_bool("OSDB_USE_LOCALHOST", defaults.use_localhost);
    let request_timeout_secs = match std::env::var("OSDB_REQUEST_TIMEOUT_SECS") {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| OsdbError::Config(format!("Invalid request timeout: {e}")))?,
        Err(_) => defaults.request_timeout_secs,
    };

    let config = ConnectorConfig {
        server_url,
        api_token,
        greeting,
        verify_token: false,
        use_localhost,
        request_timeout_secs,
    };
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
/// Missing fields take their defaults.
///
/// # Errors
/// Returns `OsdbError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The loaded values fail [`validate`]
pub fn load_from_file(path: Option<PathBuf>) -> Result<ConnectorConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(OsdbError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            OsdbError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| OsdbError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Check values that serde cannot: the server URL and the timeout.
///
/// # Errors
/// Returns `OsdbError::Config` describing the first invalid value.
pub fn validate(config: &ConnectorConfig) -> Result<()> {
    validate_base_url(&config.effective_server_url())
        .map_err(|e| OsdbError::Config(format!("Invalid server_url: {e}")))?;

    if config.request_timeout_secs == 0 {
        return Err(OsdbError::Config("request_timeout_secs must be greater than zero".into()));
    }

    Ok(())
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ConnectorConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| OsdbError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| OsdbError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(OsdbError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory first, then the directory of the
/// running executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| cwd.join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| OsdbError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
