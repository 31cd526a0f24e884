//! Account identity supplied by the game host

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque 64-bit handle of the logged-in account.
///
/// The host reports `-1` while no account is known; that value is kept as
/// [`AccountIdentity::UNSET`] rather than an `Option` so that identities read
/// straight from the host need no translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountIdentity(i64);

impl AccountIdentity {
    /// No identity yet.
    pub const UNSET: Self = Self(-1);

    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Map an optional host value, treating `None` as unset.
    pub fn from_host(raw: Option<i64>) -> Self {
        raw.map_or(Self::UNSET, Self)
    }

    pub const fn is_set(self) -> bool {
        self.0 != Self::UNSET.0
    }

    pub const fn raw(self) -> i64 {
        self.0
    }
}

impl Default for AccountIdentity {
    fn default() -> Self {
        Self::UNSET
    }
}

impl fmt::Display for AccountIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_set() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("unset")
        }
    }
}
