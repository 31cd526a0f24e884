//! Domain types and models

pub mod account;
pub mod credential;
pub mod envelope;
pub mod items;
pub mod notification;
pub mod offer;
pub mod session;

pub use account::AccountIdentity;
pub use credential::ApiToken;
pub use envelope::{OfferEnvelope, SyncEnvelope};
pub use items::{ContainerKind, ItemEntry, ResourceKind, ResourceSnapshot};
pub use notification::{AuthStatus, Notification};
pub use offer::{MarketOffer, OfferState};
pub use session::SessionState;
