//! Grand Exchange offers

use serde::{Deserialize, Serialize};

use crate::constants::OFFER_NOTIFY_THRESHOLD;
use crate::impl_domain_enum_conversions;

/// Lifecycle state of a market offer, named as the game client names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferState {
    Empty,
    CancelledBuy,
    CancelledSell,
    Buying,
    Bought,
    Selling,
    Sold,
}

impl_domain_enum_conversions!(OfferState {
    Empty => "empty",
    CancelledBuy => "cancelled_buy",
    CancelledSell => "cancelled_sell",
    Buying => "buying",
    Bought => "bought",
    Selling => "selling",
    Sold => "sold",
});

/// Snapshot of one Grand Exchange slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOffer {
    pub item_id: i32,
    pub price: i32,
    pub total_quantity: i32,
    pub state: OfferState,
}

impl MarketOffer {
    /// Slot refers to an actual item.
    pub const fn has_item(&self) -> bool {
        self.item_id > 0
    }

    /// `price * total_quantity`, widened so large offers cannot overflow.
    pub const fn trade_value(&self) -> i64 {
        self.price as i64 * self.total_quantity as i64
    }

    pub const fn is_notable(&self) -> bool {
        self.trade_value() >= OFFER_NOTIFY_THRESHOLD
    }
}
