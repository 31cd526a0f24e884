//! # OSDB Core
//!
//! Connector logic with no I/O of its own.
//!
//! This crate contains:
//! - Port traits towards the HTTP transport and the game host
//! - The session manager (authentication state machine)
//! - The sync dispatcher (per-kind in-flight guard, envelope building)
//! - The event coordinator that ties host events to both
//!
//! ## Architecture Principles
//! - Only depends on `osdb-domain`
//! - No HTTP or host code; everything external goes through a trait
//! - Network calls run on spawned tasks and report back as messages

pub mod coordinator;
pub mod session;
pub mod sync;

// Ports
pub mod host_ports;
pub mod transport_ports;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use coordinator::{EventCoordinator, HostEvent};
pub use host_ports::{CredentialProvider, GameHost, HostUi};
pub use session::{AuthFailure, AuthResult, PendingAuth, SessionManager};
pub use sync::{PreparedSync, SkipReason, SyncDispatcher, SyncFailure, SyncOutcome};
pub use transport_ports::{Transport, TransportResponse};
