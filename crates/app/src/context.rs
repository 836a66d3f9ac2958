//! Application context.
//!
//! One instance per process (or per test). Everything that needs to know who
//! is signed in reads it from here; nothing else holds session state.

use std::sync::Arc;

use adminboard_auth::{
    Capability, CredentialVerifier, Feature, Role, Session, SessionStore, SnapshotStore,
    VerifyError, enabled_features,
};
use adminboard_directory::{Account, AccountDirectory};
use adminboard_navigation::{Decision, NavItem, RouteTable, RoutingError, visible_items};

use crate::login::{LoginController, LoginError, LoginOutcome, LoginTicket};

pub struct AppContext {
    sessions: SessionStore,
    verifier: CredentialVerifier,
    login: LoginController,
    routes: RouteTable,
    menu: Vec<NavItem>,
}

impl AppContext {
    /// Build the context and restore any remembered session.
    pub fn new(
        directory: Arc<dyn AccountDirectory>,
        snapshots: Arc<dyn SnapshotStore>,
        snapshot_key: &str,
    ) -> Result<Self, RoutingError> {
        let routes = RouteTable::dashboard();
        let menu = NavItem::dashboard_menu(&routes)?;

        Ok(Self {
            sessions: SessionStore::open(snapshots, snapshot_key),
            verifier: CredentialVerifier::new(directory),
            login: LoginController::new(),
            routes,
            menu,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Readers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        self.sessions.session()
    }

    pub fn role(&self) -> Option<Role> {
        self.sessions.session().role()
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn can(&self, capability: Capability) -> bool {
        capability.permits(self.role())
    }

    pub fn feature_enabled(&self, feature: Feature) -> bool {
        feature.enabled_for(self.role())
    }

    pub fn enabled_features(&self) -> Vec<Feature> {
        enabled_features(self.role())
    }

    /// Menu items for the current role, in display order.
    pub fn visible_menu(&self) -> Vec<&NavItem> {
        visible_items(&self.menu, self.role())
    }

    /// Route decision for `path` against the current session.
    pub fn navigate(&self, path: &str) -> Result<Decision, RoutingError> {
        self.routes.navigate(self.sessions.session(), path)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Login / logout
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a login; the returned ticket must be passed to
    /// [`AppContext::finish_login`] together with the verification result.
    pub fn begin_login(&mut self, email: &str, remember_me: bool) -> Result<LoginTicket, LoginError> {
        self.login.submit(email, remember_me, self.sessions.epoch())
    }

    /// Verifier handle that can be moved into a background task.
    pub fn verifier(&self) -> CredentialVerifier {
        self.verifier.clone()
    }

    pub fn finish_login(
        &mut self,
        ticket: LoginTicket,
        result: Result<Account, VerifyError>,
    ) -> Result<LoginOutcome, LoginError> {
        self.login.complete(ticket, result, &mut self.sessions)
    }

    /// The login view was left before verification finished.
    pub fn abandon_login(&mut self) {
        self.login.abandon();
    }

    pub fn login_pending(&self) -> bool {
        self.login.is_pending()
    }

    /// Submit, verify and apply in one go.
    ///
    /// Dropping the returned future before it completes releases the
    /// submission lock.
    pub async fn login(&mut self, email: &str, remember_me: bool) -> Result<LoginOutcome, LoginError> {
        let ticket = self.begin_login(email, remember_me)?;
        let email = ticket.email().to_string();
        let verifier = self.verifier();

        let pending = PendingLogin { ctx: self, ticket: Some(ticket) };
        let result = verifier.verify(&email).await;
        pending.finish(result)
    }

    pub fn logout(&mut self) {
        self.login.abandon();
        self.sessions.clear();
    }
}

/// Holds a submitted ticket across the verification await and abandons it
/// if the await never resumes.
struct PendingLogin<'a> {
    ctx: &'a mut AppContext,
    ticket: Option<LoginTicket>,
}

impl PendingLogin<'_> {
    fn finish(mut self, result: Result<Account, VerifyError>) -> Result<LoginOutcome, LoginError> {
        match self.ticket.take() {
            Some(ticket) => self.ctx.finish_login(ticket, result),
            None => Ok(LoginOutcome::Discarded),
        }
    }
}

impl Drop for PendingLogin<'_> {
    fn drop(&mut self) {
        if self.ticket.take().is_some() {
            tracing::debug!("login cancelled before verification finished");
            self.ctx.abandon_login();
        }
    }
}

impl core::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppContext")
            .field("sessions", &self.sessions)
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}
