//! Non-blocking event sender given to the host

use osdb_core::HostEvent;
use osdb_domain::{AccountIdentity, ApiToken, ContainerKind, MarketOffer};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Queues host events for the connector task.
///
/// Events from one handle (and its clones) are applied in the order they
/// were published. Publishing never blocks and never fails loudly; after
/// the connector stops, events are dropped.
#[derive(Debug, Clone)]
pub struct ConnectorHandle {
    events: UnboundedSender<HostEvent>,
}

impl ConnectorHandle {
    pub(crate) const fn new(events: UnboundedSender<HostEvent>) -> Self {
        Self { events }
    }

    /// Queue `event`. Returns `false` if the connector has stopped.
    pub fn publish(&self, event: HostEvent) -> bool {
        match self.events.send(event) {
            Ok(()) => true,
            Err(err) => {
                debug!(event = err.0.name(), "Connector stopped; dropping event");
                false
            }
        }
    }

    pub fn startup(&self) -> bool {
        self.publish(HostEvent::Startup)
    }

    pub fn shutdown(&self) -> bool {
        self.publish(HostEvent::Shutdown)
    }

    /// The host reported a new account hash; `None` means no account.
    pub fn identity_changed(&self, raw: Option<i64>) -> bool {
        self.publish(HostEvent::IdentityChanged(AccountIdentity::from_host(raw)))
    }

    pub fn container_changed(&self, kind: ContainerKind) -> bool {
        self.publish(HostEvent::ContainerChanged(kind))
    }

    pub fn offer_changed(&self, slot: u8, offer: MarketOffer) -> bool {
        self.publish(HostEvent::OfferChanged { slot, offer })
    }

    pub fn login_state_changed(&self, logged_in: bool) -> bool {
        self.publish(HostEvent::LoginStateChanged { logged_in })
    }

    pub fn credential_changed(&self, token: impl Into<ApiToken>) -> bool {
        self.publish(HostEvent::CredentialConfigChanged(token.into()))
    }

    pub fn verify_requested(&self) -> bool {
        self.publish(HostEvent::VerifyRequested)
    }

    /// Whether the connector task is still receiving events.
    pub fn is_open(&self) -> bool {
        !self.events.is_closed()
    }
}
