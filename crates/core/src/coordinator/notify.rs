//! Which sync outcomes the player gets told about

use osdb_domain::{ContainerKind, MarketOffer, Notification};

use crate::sync::SyncOutcome;

/// Chat message for a finished container sync, if any.
///
/// Skips are silent. Only a failed bank sync is reported; other failures
/// are left to the logs.
pub fn container_notification(kind: ContainerKind, outcome: &SyncOutcome) -> Option<Notification> {
    match (kind, outcome) {
        (ContainerKind::Bank, SyncOutcome::Sent { item_count }) => {
            Some(Notification::BankSynced { items: *item_count })
        }
        (ContainerKind::Bank, SyncOutcome::Failed(_)) => Some(Notification::BankSyncFailed),
        (ContainerKind::Inventory, SyncOutcome::Sent { item_count }) if *item_count > 0 => {
            Some(Notification::InventorySynced { items: *item_count })
        }
        (ContainerKind::Equipment, SyncOutcome::Sent { item_count }) => {
            Some(Notification::EquipmentSynced { items: *item_count })
        }
        _ => None,
    }
}

/// Chat message for a finished offer sync: successful, notable and logged
/// in.
pub fn offer_notification(
    offer: &MarketOffer,
    outcome: &SyncOutcome,
    logged_in: bool,
) -> Option<Notification> {
    (outcome.is_success() && logged_in && offer.is_notable()).then(|| Notification::OfferSynced {
        state: offer.state,
        value: offer.trade_value(),
    })
}
