//! Wire payloads posted to the sync endpoints

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AccountIdentity, MarketOffer, OfferState, ResourceSnapshot};

/// Body of a bank, inventory or equipment sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncEnvelope {
    pub account_hash: AccountIdentity,
    /// Wall-clock time in epoch milliseconds.
    pub timestamp: i64,
    pub items: ResourceSnapshot,
}

impl SyncEnvelope {
    pub fn new(account_hash: AccountIdentity, at: DateTime<Utc>, items: ResourceSnapshot) -> Self {
        Self { account_hash, timestamp: at.timestamp_millis(), items }
    }
}

/// Body of a market offer sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferEnvelope {
    pub account_hash: AccountIdentity,
    pub slot: u8,
    pub state: OfferState,
    pub item_id: i32,
    pub price: i32,
    pub total_quantity: i32,
}

impl OfferEnvelope {
    pub const fn new(account_hash: AccountIdentity, slot: u8, offer: &MarketOffer) -> Self {
        Self {
            account_hash,
            slot,
            state: offer.state,
            item_id: offer.item_id,
            price: offer.price,
            total_quantity: offer.total_quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::ItemEntry;

    #[test]
    fn container_envelope_matches_wire_shape() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let items = ResourceSnapshot::filter(&[ItemEntry::new(995, 50), ItemEntry::new(-1, 0)]);
        let envelope = SyncEnvelope::new(AccountIdentity::new(123_456_789), at, items);

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "account_hash": 123_456_789,
                "timestamp": 1_700_000_000_123_i64,
                "items": [{ "item_id": 995, "quantity": 50 }]
            })
        );
    }

    #[test]
    fn empty_snapshot_still_has_items_array() {
        let envelope =
            SyncEnvelope::new(AccountIdentity::new(1), Utc::now(), ResourceSnapshot::default());
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["items"], json!([]));
    }

    #[test]
    fn offer_envelope_matches_wire_shape() {
        let offer =
            MarketOffer {
                item_id: 4151,
                price: 2_000_000,
                total_quantity: 1,
                state: OfferState::Sold,
            };
        let envelope = OfferEnvelope::new(AccountIdentity::new(42), 3, &offer);

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "account_hash": 42,
                "slot": 3,
                "state": "SOLD",
                "item_id": 4151,
                "price": 2_000_000,
                "total_quantity": 1
            })
        );
    }
}
