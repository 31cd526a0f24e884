//! Sync dispatcher - one post per resource kind, never two at once

use std::sync::Arc;

use chrono::Utc;
use osdb_domain::{
    AccountIdentity, ApiToken, ContainerKind, ItemEntry, MarketOffer, OfferEnvelope,
    ResourceKind, ResourceSnapshot, SyncEnvelope,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::pending::{PendingFlags, PendingGuard};
use crate::host_ports::CredentialProvider;
use crate::transport_ports::Transport;

/// Precondition that stopped a sync before any request was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No account identity yet.
    UnsetIdentity,
    /// The session holds no accepted token.
    NoCredential,
    /// A sync of the same kind is still in flight; this one is dropped.
    AlreadyPending,
    /// Offer slot without an item.
    EmptyOffer,
}

/// Why a sync request did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncFailure {
    #[error("failed to encode payload: {0}")]
    Encode(String),

    #[error("sync request failed: {0}")]
    Transport(String),

    #[error("server answered with status {0}")]
    Status(u16),
}

/// Result of one sync call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Accepted by the server; `item_count` is the filtered size (1 for
    /// offers).
    Sent { item_count: usize },
    /// Not sent; no request was made.
    Skipped(SkipReason),
    /// Sent but not accepted, or the request itself failed.
    Failed(SyncFailure),
}

impl SyncOutcome {
    /// True only for [`SyncOutcome::Sent`].
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

#[derive(Debug)]
enum Payload {
    Container(SyncEnvelope),
    Offer(OfferEnvelope),
}

impl Payload {
    fn item_count(&self) -> usize {
        match self {
            Self::Container(envelope) => envelope.items.len(),
            Self::Offer(_) => 1,
        }
    }

    fn encode(&self) -> serde_json::Result<Value> {
        match self {
            Self::Container(envelope) => serde_json::to_value(envelope),
            Self::Offer(envelope) => serde_json::to_value(envelope),
        }
    }
}

/// Maps snapshots to envelopes and posts them, one in flight per kind.
///
/// Clones share the same pending flags.
#[derive(Clone)]
pub struct SyncDispatcher {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialProvider>,
    pending: Arc<PendingFlags>,
}

impl SyncDispatcher {
    /// Dispatcher posting through `transport` with tokens from `credentials`.
    pub fn new(transport: Arc<dyn Transport>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self { transport, credentials, pending: Arc::new(PendingFlags::new()) }
    }

    /// A sync of `kind` is currently in flight.
    pub fn is_pending(&self, kind: ResourceKind) -> bool {
        self.pending.is_pending(kind)
    }

    /// Post the bank snapshot for `identity`.
    pub async fn sync_bank(&self, identity: AccountIdentity, items: &[ItemEntry]) -> SyncOutcome {
        self.sync_container(ContainerKind::Bank, identity, items).await
    }

    /// Post the inventory snapshot for `identity`.
    pub async fn sync_inventory(
        &self,
        identity: AccountIdentity,
        items: &[ItemEntry],
    ) -> SyncOutcome {
        self.sync_container(ContainerKind::Inventory, identity, items).await
    }

    /// Post the worn equipment for `identity`.
    pub async fn sync_equipment(
        &self,
        identity: AccountIdentity,
        items: &[ItemEntry],
    ) -> SyncOutcome {
        self.sync_container(ContainerKind::Equipment, identity, items).await
    }

    /// Filter `items`, then post them to the endpoint for `kind`.
    pub async fn sync_container(
        &self,
        kind: ContainerKind,
        identity: AccountIdentity,
        items: &[ItemEntry],
    ) -> SyncOutcome {
        match self.prepare_container(kind, identity, items) {
            Ok(prepared) => prepared.send().await,
            Err(reason) => SyncOutcome::Skipped(reason),
        }
    }

    /// Post one Grand Exchange slot. Empty slots are skipped.
    pub async fn sync_offer(
        &self,
        identity: AccountIdentity,
        slot: u8,
        offer: &MarketOffer,
    ) -> SyncOutcome {
        match self.prepare_offer(identity, slot, offer) {
            Ok(prepared) => prepared.send().await,
            Err(reason) => SyncOutcome::Skipped(reason),
        }
    }

    /// Check preconditions, claim the pending flag and build the envelope.
    ///
    /// The flag is held by the returned [`PreparedSync`] until it is sent or
    /// dropped.
    pub fn prepare_container(
        &self,
        kind: ContainerKind,
        identity: AccountIdentity,
        items: &[ItemEntry],
    ) -> Result<PreparedSync, SkipReason> {
        let (credential, guard) = self.claim(kind.into(), identity)?;
        let envelope = SyncEnvelope::new(identity, Utc::now(), ResourceSnapshot::filter(items));
        Ok(self.prepared(guard, credential, identity, Payload::Container(envelope)))
    }

    pub fn prepare_offer(
        &self,
        identity: AccountIdentity,
        slot: u8,
        offer: &MarketOffer,
    ) -> Result<PreparedSync, SkipReason> {
        if !offer.has_item() {
            return Err(SkipReason::EmptyOffer);
        }
        let (credential, guard) = self.claim(ResourceKind::Offer, identity)?;
        let envelope = OfferEnvelope::new(identity, slot, offer);
        Ok(self.prepared(guard, credential, identity, Payload::Offer(envelope)))
    }

    fn claim(
        &self,
        kind: ResourceKind,
        identity: AccountIdentity,
    ) -> Result<(ApiToken, PendingGuard), SkipReason> {
        if !identity.is_set() {
            return Err(SkipReason::UnsetIdentity);
        }
        let credential = self.credentials.bearer().ok_or(SkipReason::NoCredential)?;
        let guard = self.pending.try_acquire(kind).ok_or(SkipReason::AlreadyPending)?;
        Ok((credential, guard))
    }

    fn prepared(
        &self,
        guard: PendingGuard,
        credential: ApiToken,
        identity: AccountIdentity,
        payload: Payload,
    ) -> PreparedSync {
        PreparedSync {
            transport: Arc::clone(&self.transport),
            credential,
            identity,
            payload,
            guard,
        }
    }
}

/// A sync that holds its kind's pending flag and is ready to post.
#[must_use = "dropping a PreparedSync releases its pending flag without sending"]
pub struct PreparedSync {
    transport: Arc<dyn Transport>,
    credential: ApiToken,
    identity: AccountIdentity,
    payload: Payload,
    guard: PendingGuard,
}

impl PreparedSync {
    /// Resource this sync posts.
    pub const fn kind(&self) -> ResourceKind {
        self.guard.kind()
    }

    /// Items in the filtered snapshot, or 1 for an offer.
    pub fn item_count(&self) -> usize {
        self.payload.item_count()
    }

    /// Post the envelope. The pending flag is released when this returns.
    #[instrument(skip(self), fields(kind = %self.kind(), account = %self.identity))]
    pub async fn send(self) -> SyncOutcome {
        let kind = self.kind();
        let item_count = self.item_count();

        let body = match self.payload.encode() {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "Failed to encode sync payload");
                return SyncOutcome::Failed(SyncFailure::Encode(err.to_string()));
            }
        };

        match self.transport.post_json(kind.sync_path(), &self.credential, &body).await {
            Ok(response) if response.is_success() => {
                debug!(item_count, "Data synced successfully");
                SyncOutcome::Sent { item_count }
            }
            Ok(response) => {
                warn!(
                    status = response.status,
                    body = response.body_excerpt(),
                    "Sync failed with error status"
                );
                SyncOutcome::Failed(SyncFailure::Status(response.status))
            }
            Err(err) => {
                warn!(error = %err, "Sync request failed");
                SyncOutcome::Failed(SyncFailure::Transport(err.to_string()))
            }
        }
    }
}
