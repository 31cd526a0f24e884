//! Authentication session states

use serde::{Deserialize, Serialize};

use crate::impl_domain_enum_conversions;

/// Where the session manager is in its authentication lifecycle.
///
/// ```text
/// Unauthenticated --authenticate--> Authenticating --2xx + user/token--> Authenticated
///                                   Authenticating --anything else-----> Failed
/// Failed          --authenticate--> Authenticating
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticating,
    Authenticated,
    Failed,
}

impl_domain_enum_conversions!(SessionState {
    Unauthenticated => "unauthenticated",
    Authenticating => "authenticating",
    Authenticated => "authenticated",
    Failed => "failed",
});

impl SessionState {
    /// A new attempt may start from this state.
    pub const fn can_attempt(self) -> bool {
        matches!(self, Self::Unauthenticated | Self::Failed)
    }
}
