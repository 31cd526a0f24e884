//! # OSDB Domain
//!
//! Data model shared by every OSDB connector crate.
//!
//! This crate contains:
//! - Account identities, credentials and item snapshots
//! - Wire envelopes sent to the OldSchoolDB service
//! - Session states, auth status text and user notifications
//! - Connector configuration and the domain error type
//!
//! ## Architecture
//! - No dependencies on other OSDB crates
//! - No I/O; only serde/chrono/thiserror

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::ConnectorConfig;
pub use errors::*;
pub use types::*;
