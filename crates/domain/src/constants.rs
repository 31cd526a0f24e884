//! Connector constants
//!
//! Endpoints, header values and thresholds shared by the core and infra
//! layers.

// Remote service
pub const DEFAULT_SERVER_URL: &str = "https://api.oldschooldb.com";
pub const LOCALHOST_SERVER_URL: &str = "http://localhost:3001";
pub const CLIENT_USER_AGENT: &str = "OldSchoolDB-Plugin/1.0";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Endpoints
pub const CONNECTIVITY_PROBE_PATH: &str = "/api/items/mappings";
pub const AUTH_TEST_PATH: &str = "/api/plugin/auth/test";
pub const BANK_SYNC_PATH: &str = "/api/plugin/bank/sync";
pub const INVENTORY_SYNC_PATH: &str = "/api/plugin/inventory/sync";
pub const EQUIPMENT_SYNC_PATH: &str = "/api/plugin/equipment/sync";
pub const OFFER_SYNC_PATH: &str = "/api/plugin/offer/sync";

// Where users fetch a token; shown in log hints only
pub const TOKEN_HELP_URL: &str = "https://oldschooldb.com/plugin";

/// Offers worth at least this much (price x quantity) get a chat notification.
pub const OFFER_NOTIFY_THRESHOLD: i64 = 1_000_000;

/// Number of token characters shown in log previews.
pub const TOKEN_PREVIEW_CHARS: usize = 10;

pub const DEFAULT_GREETING: &str = "OldSchoolDB: Bank sync ready! Open your bank to track items.";
