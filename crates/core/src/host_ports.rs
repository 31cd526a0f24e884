//! Ports towards the embedding game client

use osdb_domain::{AccountIdentity, ApiToken, AuthStatus, ContainerKind, ItemEntry, Notification};

/// Read access to the live game session.
pub trait GameHost: Send + Sync {
    /// Identity of the logged-in account, `UNSET` when unknown.
    fn account_identity(&self) -> AccountIdentity;

    /// Current slots of a container, `None` when the client has not loaded it.
    fn container_items(&self, kind: ContainerKind) -> Option<Vec<ItemEntry>>;

    /// Player is in game (not on the login screen).
    fn is_logged_in(&self) -> bool;
}

/// Output surfaces owned by the host: chat box and settings panel.
pub trait HostUi: Send + Sync {
    /// Show a line in the game chat.
    fn post_message(&self, notification: &Notification);

    /// Update the status field in the settings panel.
    fn publish_auth_status(&self, status: AuthStatus);

    /// Untick the "verify now" checkbox after a manual verification starts.
    fn clear_verify_trigger(&self);
}

/// Supplies the bearer token for sync requests.
pub trait CredentialProvider: Send + Sync {
    /// A token the server has accepted, if any.
    fn bearer(&self) -> Option<ApiToken>;
}
