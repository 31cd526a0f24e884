//! Authentication session: state machine plus the accepted bearer token

pub mod service;

pub use service::{AuthFailure, AuthResult, PendingAuth, SessionManager};
