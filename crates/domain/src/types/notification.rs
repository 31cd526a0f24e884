//! User-visible messages and the auth status line

use std::fmt;

use serde::{Deserialize, Serialize};

use super::OfferState;

/// Status text written back to the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthStatus {
    NotVerified,
    Verifying,
    Verified,
    Invalid,
}

impl fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotVerified => "Not verified",
            Self::Verifying => "⏳ Verifying...",
            Self::Verified => "✓ Verified - Connected",
            Self::Invalid => "✗ Invalid - Check token",
        })
    }
}

/// Chat messages posted to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    Greeting(String),
    Connected,
    AuthenticationFailed,
    BankSynced { items: usize },
    BankSyncFailed,
    InventorySynced { items: usize },
    EquipmentSynced { items: usize },
    OfferSynced { state: OfferState, value: i64 },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greeting(text) => f.write_str(text),
            Self::Connected => f.write_str("OldSchoolDB: Connected and authenticated!"),
            Self::AuthenticationFailed => {
                f.write_str("OldSchoolDB: Authentication failed - check your token!")
            }
            Self::BankSynced { items } => write!(f, "OldSchoolDB: Bank synced ({items} items)"),
            Self::BankSyncFailed => f.write_str("OldSchoolDB: Bank sync failed - check connection"),
            Self::InventorySynced { items } => {
                write!(f, "OldSchoolDB: Inventory synced ({items} items)")
            }
            Self::EquipmentSynced { items } => {
                write!(f, "OldSchoolDB: Equipment synced ({items} items)")
            }
            Self::OfferSynced { state, value } => {
                write!(f, "OldSchoolDB: GE {state} synced ({}M gp)", value / 1_000_000)
            }
        }
    }
}
