//! # OSDB Connector
//!
//! Entry point for a game client embedding the OldSchoolDB connector.
//!
//! The host builds one [`Connector`] with its [`GameHost`] and [`HostUi`]
//! implementations, then forwards every game notification through a
//! [`ConnectorHandle`]. Handles never block: events are queued and applied
//! in order on the connector's own task.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use osdb_connector::{Connector, HeadlessHost, LogUi};
//! # async fn demo() -> osdb_domain::Result<()> {
//! let config = osdb_infra::config::load()?;
//! let connector = Connector::new(config, Arc::new(HeadlessHost), Arc::new(LogUi::new()))?;
//! let handle = connector.handle();
//! handle.startup();
//! handle.login_state_changed(true);
//! connector.close().await
//! # }
//! ```

pub mod connector;
pub mod handle;
pub mod headless;

pub use connector::Connector;
pub use handle::ConnectorHandle;
pub use headless::{HeadlessHost, LogUi};
pub use osdb_core::{GameHost, HostEvent, HostUi};
