//! Event coordinator
//!
//! Turns host events into session and sync calls, and sync/auth results
//! into chat messages and settings-panel status.
//!
//! The coordinator is driven by exactly one task ([`EventCoordinator::run`]).
//! Host events arrive on one channel and completions of spawned network
//! calls on another; both are applied on that task, so coordinator state is
//! plain fields with no lock. Network calls never block event handling.

pub mod events;
pub mod notify;

use std::future::Future;
use std::sync::Arc;

use osdb_domain::constants::TOKEN_HELP_URL;
use osdb_domain::{
    AccountIdentity, AuthStatus, ConnectorConfig, ContainerKind, MarketOffer, Notification,
    SessionState,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

pub use self::events::HostEvent;
use self::events::Completion;
pub use self::notify::{container_notification, offer_notification};
use crate::host_ports::{GameHost, HostUi};
use crate::session::{AuthFailure, AuthResult, SessionManager};
use crate::sync::{SyncDispatcher, SyncOutcome};
use crate::transport_ports::Transport;

/// Serial state machine between the host and the remote service.
pub struct EventCoordinator {
    config: ConnectorConfig,
    host: Arc<dyn GameHost>,
    ui: Arc<dyn HostUi>,
    session: SessionManager,
    dispatcher: SyncDispatcher,
    identity: AccountIdentity,
    active: bool,
    /// Auth succeeded while logged out; say so on the next login.
    connected_notice_pending: bool,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
    in_flight: usize,
}

enum Next {
    Event(Option<HostEvent>),
    Completion(Completion),
}

impl EventCoordinator {
    pub fn new(
        config: ConnectorConfig,
        transport: Arc<dyn Transport>,
        host: Arc<dyn GameHost>,
        ui: Arc<dyn HostUi>,
    ) -> Self {
        let session = SessionManager::new(Arc::clone(&transport));
        let dispatcher = SyncDispatcher::new(transport, Arc::new(session.clone()));
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            config,
            host,
            ui,
            session,
            dispatcher,
            identity: AccountIdentity::UNSET,
            active: false,
            connected_notice_pending: false,
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    pub const fn identity(&self) -> AccountIdentity {
        self.identity
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Spawned calls whose completion has not been applied yet.
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub const fn session(&self) -> &SessionManager {
        &self.session
    }

    pub const fn dispatcher(&self) -> &SyncDispatcher {
        &self.dispatcher
    }

    /// Consume host events until the sender side closes, then settle.
    pub async fn run(mut self, mut events: UnboundedReceiver<HostEvent>) {
        debug!("Event coordinator running");
        loop {
            let next = tokio::select! {
                event = events.recv() => Next::Event(event),
                Some(completion) = self.completions_rx.recv() => Next::Completion(completion),
            };

            match next {
                Next::Event(Some(event)) => self.handle(event),
                Next::Event(None) => break,
                Next::Completion(completion) => self.apply(completion),
            }
        }

        self.settle().await;
        debug!("Event coordinator stopped");
    }

    /// Wait for every spawned call and apply its completion, including calls
    /// started by those completions.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.completions_rx.recv().await {
                Some(completion) => self.apply(completion),
                None => break,
            }
        }
    }

    /// Apply one host event. Must be called from within a tokio runtime.
    pub fn handle(&mut self, event: HostEvent) {
        if !self.active && event != HostEvent::Startup {
            let name = event.name();
            if let HostEvent::CredentialConfigChanged(token) = event {
                self.config.api_token = token;
            }
            debug!(event = name, "Connector inactive; ignoring event");
            return;
        }

        match event {
            HostEvent::Startup => self.on_startup(),
            HostEvent::Shutdown => self.on_shutdown(),
            HostEvent::IdentityChanged(identity) => self.on_identity_changed(identity),
            HostEvent::ContainerChanged(kind) => {
                self.resolve_identity();
                if self.ready_to_sync() {
                    self.sync_container(kind);
                }
            }
            HostEvent::OfferChanged { slot, offer } => {
                self.resolve_identity();
                if self.ready_to_sync() {
                    self.sync_offer(slot, offer);
                }
            }
            HostEvent::LoginStateChanged { logged_in: true } => self.on_login(),
            HostEvent::LoginStateChanged { logged_in: false } => {
                debug!(identity = %self.identity, "Logged out; clearing account identity");
                self.identity = AccountIdentity::UNSET;
            }
            HostEvent::CredentialConfigChanged(token) => {
                info!(token = %token.preview(), "API token changed, verifying");
                self.config.api_token = token;
                self.reverify();
            }
            HostEvent::VerifyRequested => {
                info!("Manual token verification requested");
                self.reverify();
                self.config.verify_token = false;
                self.ui.clear_verify_trigger();
            }
        }
    }

    fn on_startup(&mut self) {
        info!(server = %self.config.effective_server_url(), "OldSchoolDB connector started");
        self.active = true;
        self.ui.publish_auth_status(AuthStatus::NotVerified);

        let session = self.session.clone();
        self.spawn(async move {
            Completion::Connectivity { reachable: session.test_connectivity().await }
        });
    }

    fn on_shutdown(&mut self) {
        info!("OldSchoolDB connector stopped");
        self.active = false;
        self.identity = AccountIdentity::UNSET;
        self.connected_notice_pending = false;
        self.session.reset();
    }

    fn on_identity_changed(&mut self, identity: AccountIdentity) {
        info!(%identity, "Account identity changed");
        self.identity = identity;
        if self.ready_to_sync() {
            self.sync_container(ContainerKind::Bank);
        }
    }

    fn on_login(&mut self) {
        if !self.config.greeting.trim().is_empty() {
            self.ui.post_message(&Notification::Greeting(self.config.greeting.clone()));
        }

        if self.connected_notice_pending {
            self.connected_notice_pending = false;
            self.ui.post_message(&Notification::Connected);
        }

        if self.session.state().can_attempt() {
            self.start_authentication();
        }
    }

    fn reverify(&mut self) {
        self.ui.publish_auth_status(AuthStatus::Verifying);
        self.session.reset();
        self.start_authentication();
    }

    fn start_authentication(&mut self) {
        match self.session.begin(self.config.api_token.clone()) {
            Ok(pending) => self.spawn(async move { Completion::Auth(pending.complete().await) }),
            Err(AuthResult::Rejected(AuthFailure::MissingCredential)) => {
                info!(help_url = TOKEN_HELP_URL, "No API token configured");
                self.ui.publish_auth_status(AuthStatus::NotVerified);
            }
            Err(result) => debug!(?result, "Authentication not started"),
        }
    }

    fn resolve_identity(&mut self) {
        if !self.identity.is_set() {
            self.identity = self.host.account_identity();
            debug!(identity = %self.identity, "Resolved account identity from host");
        }
    }

    fn ready_to_sync(&self) -> bool {
        self.identity.is_set() && self.session.is_authenticated()
    }

    fn sync_container(&mut self, kind: ContainerKind) {
        let Some(items) = self.host.container_items(kind) else {
            debug!(%kind, "Container not loaded; skipping sync");
            return;
        };

        match self.dispatcher.prepare_container(kind, self.identity, &items) {
            Ok(prepared) => {
                debug!(%kind, items = prepared.item_count(), "Dispatching container sync");
                self.spawn(async move {
                    Completion::ContainerSynced { kind, outcome: prepared.send().await }
                });
            }
            Err(reason) => debug!(%kind, ?reason, "Container sync skipped"),
        }
    }

    fn sync_offer(&mut self, slot: u8, offer: MarketOffer) {
        match self.dispatcher.prepare_offer(self.identity, slot, &offer) {
            Ok(prepared) => {
                debug!(slot, state = %offer.state, "Dispatching offer sync");
                self.spawn(async move {
                    Completion::OfferSynced { slot, offer, outcome: prepared.send().await }
                });
            }
            Err(reason) => debug!(slot, ?reason, "Offer sync skipped"),
        }
    }

    fn spawn<F>(&mut self, work: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        self.in_flight += 1;
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            // The receiver lives as long as the coordinator.
            let _ = completions.send(work.await);
        });
    }

    fn apply(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match completion {
            Completion::Connectivity { reachable: true } => {
                info!("Successfully connected to OldSchoolDB server");
                if self.active && self.session.state().can_attempt() {
                    self.start_authentication();
                }
            }
            Completion::Connectivity { reachable: false } => {
                warn!(
                    server = %self.config.effective_server_url(),
                    "Failed to connect to OldSchoolDB server"
                );
            }
            Completion::Auth(result) => self.on_auth_result(result),
            Completion::ContainerSynced { kind, outcome } => {
                log_sync_outcome(&kind.to_string(), &outcome);
                if !self.active {
                    return;
                }
                if let Some(notification) = container_notification(kind, &outcome) {
                    self.ui.post_message(&notification);
                }
            }
            Completion::OfferSynced { slot, offer, outcome } => {
                log_sync_outcome("offer", &outcome);
                debug!(slot, "Offer sync settled");
                if !self.active {
                    return;
                }
                let logged_in = self.host.is_logged_in();
                if let Some(notification) = offer_notification(&offer, &outcome, logged_in) {
                    self.ui.post_message(&notification);
                }
            }
        }
    }

    fn on_auth_result(&mut self, result: AuthResult) {
        match result {
            AuthResult::Authenticated { .. } => {
                self.ui.publish_auth_status(AuthStatus::Verified);
                if self.host.is_logged_in() {
                    self.ui.post_message(&Notification::Connected);
                } else {
                    self.connected_notice_pending = true;
                }
            }
            AuthResult::Rejected(failure) => {
                warn!(reason = %failure, "OldSchoolDB authentication failed");
                self.ui.publish_auth_status(AuthStatus::Invalid);
                if self.host.is_logged_in() {
                    self.ui.post_message(&Notification::AuthenticationFailed);
                }
            }
            other @ (AuthResult::AlreadyInFlight
            | AuthResult::AlreadyAuthenticated
            | AuthResult::Superseded) => {
                debug!(result = ?other, "Authentication result discarded");
            }
        }
    }
}

fn log_sync_outcome(kind: &str, outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::Sent { item_count } => info!(kind, item_count, "Sync complete"),
        SyncOutcome::Skipped(reason) => debug!(kind, ?reason, "Sync skipped"),
        SyncOutcome::Failed(failure) => warn!(kind, %failure, "Sync failed"),
    }
}
