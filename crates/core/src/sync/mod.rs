//! Sync dispatch: turning container snapshots into posts to the service

pub mod dispatcher;
pub mod pending;

pub use dispatcher::{PreparedSync, SkipReason, SyncDispatcher, SyncFailure, SyncOutcome};
pub use pending::{PendingFlags, PendingGuard};
