//! Item containers and their filtered snapshots

use serde::{Deserialize, Serialize};

use crate::constants::{BANK_SYNC_PATH, EQUIPMENT_SYNC_PATH, INVENTORY_SYNC_PATH, OFFER_SYNC_PATH};
use crate::impl_domain_enum_conversions;

/// One slot of a host container as reported by the game client.
///
/// Empty slots come through with id `-1` or quantity `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemEntry {
    pub item_id: i32,
    pub quantity: i32,
}

impl ItemEntry {
    pub const fn new(item_id: i32, quantity: i32) -> Self {
        Self { item_id, quantity }
    }

    /// Slot holds a real item.
    pub const fn is_occupied(&self) -> bool {
        self.item_id > 0 && self.quantity > 0
    }
}

/// The four kinds of data tracked by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Bank,
    Inventory,
    Equipment,
    Offer,
}

impl_domain_enum_conversions!(ResourceKind {
    Bank => "bank",
    Inventory => "inventory",
    Equipment => "equipment",
    Offer => "offer",
});

impl ResourceKind {
    pub const ALL: [Self; 4] = [Self::Bank, Self::Inventory, Self::Equipment, Self::Offer];

    /// Endpoint receiving sync posts for this kind.
    pub const fn sync_path(self) -> &'static str {
        match self {
            Self::Bank => BANK_SYNC_PATH,
            Self::Inventory => INVENTORY_SYNC_PATH,
            Self::Equipment => EQUIPMENT_SYNC_PATH,
            Self::Offer => OFFER_SYNC_PATH,
        }
    }

    /// Dense index, used for per-kind flag arrays.
    pub const fn index(self) -> usize {
        match self {
            Self::Bank => 0,
            Self::Inventory => 1,
            Self::Equipment => 2,
            Self::Offer => 3,
        }
    }
}

/// Item containers the host can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Bank,
    Inventory,
    Equipment,
}

impl_domain_enum_conversions!(ContainerKind {
    Bank => "bank",
    Inventory => "inventory",
    Equipment => "equipment",
});

impl From<ContainerKind> for ResourceKind {
    fn from(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Bank => Self::Bank,
            ContainerKind::Inventory => Self::Inventory,
            ContainerKind::Equipment => Self::Equipment,
        }
    }
}

/// Container contents with empty slots removed.
///
/// The only way to build one is through [`ResourceSnapshot::filter`], so a
/// snapshot never holds an entry with a non-positive id or quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResourceSnapshot(Vec<ItemEntry>);

impl ResourceSnapshot {
    /// Keep occupied slots in their original order.
    pub fn filter(raw: &[ItemEntry]) -> Self {
        Self(raw.iter().copied().filter(ItemEntry::is_occupied).collect())
    }

    pub fn items(&self) -> &[ItemEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_bank() -> Vec<ItemEntry> {
        vec![
            ItemEntry::new(995, 1_000_000),
            ItemEntry::new(-1, 0),
            ItemEntry::new(4151, 1),
            ItemEntry::new(0, 5),
            ItemEntry::new(561, 0),
            ItemEntry::new(560, -3),
            ItemEntry::new(385, 27),
        ]
    }

    #[test]
    fn filter_drops_empty_slots_and_keeps_order() {
        let snapshot = ResourceSnapshot::filter(&raw_bank());
        assert_eq!(
            snapshot.items(),
            &[ItemEntry::new(995, 1_000_000), ItemEntry::new(4151, 1), ItemEntry::new(385, 27)]
        );
    }

    #[test]
    fn filter_is_idempotent() {
        let once = ResourceSnapshot::filter(&raw_bank());
        let twice = ResourceSnapshot::filter(once.items());
        assert_eq!(once, twice);
    }

    #[test]
    fn all_empty_slots_yield_empty_snapshot() {
        let snapshot = ResourceSnapshot::filter(&[ItemEntry::new(-1, 0); 28]);
        assert!(snapshot.is_empty());
        assert_eq!(serde_json::to_string(&snapshot).unwrap(), "[]");
    }

    #[test]
    fn each_kind_has_its_own_endpoint() {
        let mut paths: Vec<_> = ResourceKind::ALL.iter().map(|k| k.sync_path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), ResourceKind::ALL.len());
        assert_eq!(ResourceKind::Bank.sync_path(), "/api/plugin/bank/sync");
    }

    #[test]
    fn indexes_are_dense() {
        for (expected, kind) in ResourceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), expected);
        }
    }

    #[test]
    fn container_kinds_map_onto_resource_kinds() {
        assert_eq!(ResourceKind::from(ContainerKind::Equipment), ResourceKind::Equipment);
        assert_eq!("Inventory".parse::<ContainerKind>().unwrap(), ContainerKind::Inventory);
    }
}
