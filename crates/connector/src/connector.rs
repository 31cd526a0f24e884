//! Connector - wires the HTTP transport into the event coordinator

use std::sync::Arc;

use osdb_core::{EventCoordinator, GameHost, HostUi, Transport};
use osdb_domain::{ConnectorConfig, OsdbError, Result};
use osdb_infra::HttpTransport;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::handle::ConnectorHandle;

/// A running connector: the coordinator task plus the sending side of its
/// event queue.
pub struct Connector {
    handle: ConnectorHandle,
    task: JoinHandle<()>,
}

impl Connector {
    /// Build the HTTP transport from `config` and start the coordinator.
    ///
    /// # Errors
    /// `OsdbError::Config` for an invalid server URL; `OsdbError::Internal`
    /// when called outside a tokio runtime.
    pub fn new(
        config: ConnectorConfig,
        host: Arc<dyn GameHost>,
        ui: Arc<dyn HostUi>,
    ) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        info!(server = transport.base_url(), "Connector configured");
        Self::with_transport(config, transport, host, ui)
    }

    /// Start the coordinator over any transport.
    ///
    /// # Errors
    /// `OsdbError::Internal` when called outside a tokio runtime.
    pub fn with_transport(
        config: ConnectorConfig,
        transport: Arc<dyn Transport>,
        host: Arc<dyn GameHost>,
        ui: Arc<dyn HostUi>,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|err| OsdbError::Internal(format!("connector needs a tokio runtime: {err}")))?;

        let coordinator = EventCoordinator::new(config, transport, host, ui);
        let (events, receiver) = mpsc::unbounded_channel();
        let task = runtime.spawn(coordinator.run(receiver));

        Ok(Self { handle: ConnectorHandle::new(events), task })
    }

    /// A cloneable sender for host events.
    pub fn handle(&self) -> ConnectorHandle {
        self.handle.clone()
    }

    /// Stop accepting events and wait until every queued event and in-flight
    /// call has been applied.
    ///
    /// The coordinator stops once this connector's handle and every clone of
    /// it are dropped, so outstanding clones delay completion.
    ///
    /// # Errors
    /// `OsdbError::Internal` if the coordinator task panicked.
    pub async fn close(self) -> Result<()> {
        drop(self.handle);
        self.task
            .await
            .map_err(|err| OsdbError::Internal(format!("connector task failed: {err}")))
    }
}
