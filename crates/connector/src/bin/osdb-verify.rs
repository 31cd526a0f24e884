//! Check an OldSchoolDB API token without starting the game client.
//!
//! Loads configuration the same way the connector does (environment, `.env`,
//! then `osdb.toml` / `config.json` and friends), starts the connector with a
//! headless host and waits for the token verdict. Set `OSDB_LOG_FORMAT=json`
//! for JSON log lines.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use osdb_connector::{Connector, HeadlessHost, LogUi};
use osdb_domain::AuthStatus;
use osdb_infra::{init_tracing, LogFormat};
use tracing::{error, info};

/// Extra time on top of the request timeout for the probe plus auth round
/// trip.
const VERDICT_GRACE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let format = std::env::var("OSDB_LOG_FORMAT")
        .ok()
        .and_then(|raw| raw.parse::<LogFormat>().ok())
        .unwrap_or_default();
    init_tracing(format);

    let config = osdb_infra::config::load().context("loading connector configuration")?;
    if !config.api_token.is_configured() {
        bail!("no API token configured; set OSDB_API_TOKEN or api_token in osdb.toml");
    }
    let wait = config.request_timeout() * 2 + VERDICT_GRACE;
    info!(token = %config.api_token.preview(), "Verifying API token");

    let ui = Arc::new(LogUi::new());
    let mut status = ui.subscribe();
    let connector = Connector::new(config, Arc::new(HeadlessHost), ui)
        .context("starting connector")?;
    let handle = connector.handle();
    handle.startup();

    let verdict = tokio::time::timeout(
        wait,
        status.wait_for(|s| matches!(s, AuthStatus::Verified | AuthStatus::Invalid)),
    )
    .await
    .ok()
    .and_then(|changed| changed.ok().map(|current| *current));

    handle.shutdown();
    drop(handle);
    connector.close().await.context("stopping connector")?;

    match verdict {
        Some(AuthStatus::Verified) => {
            info!("Token verified");
            Ok(())
        }
        Some(_) => {
            error!("Token rejected by server");
            bail!("token rejected")
        }
        None => bail!("no verdict within {wait:?}; is the server reachable?"),
    }
}
