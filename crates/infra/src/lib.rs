//! # OSDB Infrastructure
//!
//! Adapters behind the `osdb-core` ports.
//!
//! This crate contains:
//! - The reqwest-backed HTTP transport
//! - Configuration loading (environment, `.env`, JSON/TOML files)
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `osdb-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder, HttpTransport};
pub use observability::{init_tracing, try_init_tracing, LogFormat};
