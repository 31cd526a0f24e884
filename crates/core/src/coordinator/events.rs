//! Messages flowing into the coordinator task

use osdb_domain::{AccountIdentity, ApiToken, ContainerKind, MarketOffer};

use crate::session::AuthResult;
use crate::sync::SyncOutcome;

/// Notifications delivered by the game host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Startup,
    Shutdown,
    IdentityChanged(AccountIdentity),
    ContainerChanged(ContainerKind),
    OfferChanged { slot: u8, offer: MarketOffer },
    LoginStateChanged { logged_in: bool },
    /// The user edited the token field.
    CredentialConfigChanged(ApiToken),
    /// The user ticked "verify now".
    VerifyRequested,
}

impl HostEvent {
    /// Short name for log fields.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Shutdown => "shutdown",
            Self::IdentityChanged(_) => "identity_changed",
            Self::ContainerChanged(_) => "container_changed",
            Self::OfferChanged { .. } => "offer_changed",
            Self::LoginStateChanged { .. } => "login_state_changed",
            Self::CredentialConfigChanged(_) => "credential_config_changed",
            Self::VerifyRequested => "verify_requested",
        }
    }
}

/// Result of a spawned network call, posted back to the coordinator task.
#[derive(Debug)]
pub(crate) enum Completion {
    Connectivity { reachable: bool },
    Auth(AuthResult),
    ContainerSynced { kind: ContainerKind, outcome: SyncOutcome },
    OfferSynced { slot: u8, offer: MarketOffer, outcome: SyncOutcome },
}
