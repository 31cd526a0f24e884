//! Host adapters for running the connector without a game client
//!
//! Used by the `osdb-verify` binary to check a token from the command line.

use osdb_core::{GameHost, HostUi};
use osdb_domain::{AccountIdentity, AuthStatus, ContainerKind, ItemEntry, Notification};
use tokio::sync::watch;
use tracing::{debug, info};

/// A host with no account logged in and no containers loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessHost;

impl GameHost for HeadlessHost {
    fn account_identity(&self) -> AccountIdentity {
        AccountIdentity::UNSET
    }

    fn container_items(&self, _kind: ContainerKind) -> Option<Vec<ItemEntry>> {
        None
    }

    fn is_logged_in(&self) -> bool {
        false
    }
}

/// Writes chat messages and status changes to the log and exposes the latest
/// auth status as a watch channel.
#[derive(Debug)]
pub struct LogUi {
    status: watch::Sender<AuthStatus>,
}

impl Default for LogUi {
    fn default() -> Self {
        Self::new()
    }
}

impl LogUi {
    pub fn new() -> Self {
        let (status, _) = watch::channel(AuthStatus::NotVerified);
        Self { status }
    }

    pub fn status(&self) -> AuthStatus {
        *self.status.borrow()
    }

    /// Receiver that sees every later status change.
    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }
}

impl HostUi for LogUi {
    fn post_message(&self, notification: &Notification) {
        info!(message = %notification, "chat");
    }

    fn publish_auth_status(&self, status: AuthStatus) {
        info!(%status, "auth status");
        self.status.send_replace(status);
    }

    fn clear_verify_trigger(&self) {
        debug!("verify trigger cleared");
    }
}
