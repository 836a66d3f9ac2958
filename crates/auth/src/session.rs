//! Session state and the store that owns it.
//!
//! # Invariants
//! - A session is authenticated exactly when it holds a current user.
//! - The current user's role never changes; a new role needs a new login.
//! - A durable snapshot exists only for sessions created with "remember me".
//!   Clearing always deletes it.
//! - Restoring never fails: missing or unreadable snapshots yield the
//!   unauthenticated default.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::snapshot::{DEFAULT_SNAPSHOT_KEY, SnapshotError, SnapshotStore};
use crate::{CurrentUser, Identity, Role};

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

/// The current authentication state of the running client.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord", into = "SessionRecord")]
pub struct Session {
    current_user: Option<CurrentUser>,
    remember_me: bool,
}

impl Session {
    /// The unauthenticated default.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: CurrentUser, remember_me: bool) -> Self {
        Self {
            current_user: Some(user),
            remember_me,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.current_user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.current_user.as_ref().map(CurrentUser::role)
    }

    pub fn remember_me(&self) -> bool {
        self.remember_me
    }

    /// Encode as the durable snapshot record.
    pub fn to_snapshot(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Io(format!("encode session: {e}")))
    }

    /// Decode a durable snapshot record.
    pub fn from_snapshot(record: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(record).map_err(|e| SnapshotError::Corrupt(e.to_string()))
    }
}

/// Wire shape of a session snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    is_authenticated: bool,
    user: Option<CurrentUser>,
    remember_me: bool,
}

impl TryFrom<SessionRecord> for Session {
    type Error = String;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        if record.is_authenticated != record.user.is_some() {
            return Err(format!(
                "isAuthenticated is {} but user is {}",
                record.is_authenticated,
                if record.user.is_some() { "present" } else { "missing" }
            ));
        }

        Ok(Session {
            current_user: record.user,
            remember_me: record.remember_me,
        })
    }
}

impl From<Session> for SessionRecord {
    fn from(session: Session) -> Self {
        SessionRecord {
            is_authenticated: session.is_authenticated(),
            user: session.current_user,
            remember_me: session.remember_me,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session Store
// ─────────────────────────────────────────────────────────────────────────────

/// Sole owner and writer of the process session.
///
/// Mutation goes through `&mut self`, so every reader holding `&Session`
/// observes the result of the last completed write. The epoch increases on
/// every write and lets callers detect that the session changed underneath
/// them.
pub struct SessionStore {
    session: Session,
    snapshots: Arc<dyn SnapshotStore>,
    key: String,
    epoch: u64,
}

impl SessionStore {
    /// Store with the default (unauthenticated) session. Does not read the
    /// snapshot; call [`SessionStore::restore`] for that.
    pub fn new(snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self {
            session: Session::default(),
            snapshots,
            key: DEFAULT_SNAPSHOT_KEY.to_string(),
            epoch: 0,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Construct and restore in one step (process start).
    pub fn open(snapshots: Arc<dyn SnapshotStore>, key: impl Into<String>) -> Self {
        let mut store = Self::new(snapshots).with_key(key);
        store.restore();
        store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn snapshot_key(&self) -> &str {
        &self.key
    }

    /// Sign in `identity` with the role derived from its email.
    ///
    /// With `remember_me` the full session is persisted; without it any
    /// snapshot left by an earlier session is deleted. Persistence failures
    /// are logged; the in-memory session is updated regardless.
    pub fn authenticate(&mut self, identity: Identity, remember_me: bool) {
        let user = CurrentUser::derived(identity);
        tracing::info!(
            account_id = %user.id(),
            role = %user.role(),
            remember_me,
            "session authenticated"
        );

        self.session = Session::authenticated(user, remember_me);
        self.epoch += 1;

        if remember_me {
            self.persist();
        } else {
            self.erase();
        }
    }

    /// Reset to the unauthenticated default and delete any snapshot.
    pub fn clear(&mut self) {
        if let Some(user) = self.session.current_user() {
            tracing::info!(account_id = %user.id(), "session cleared");
        }

        self.session = Session::default();
        self.epoch += 1;
        self.erase();
    }

    /// Load the session from its durable snapshot.
    ///
    /// Missing, unreadable or inconsistent snapshots leave the default
    /// session in place. Never fails.
    pub fn restore(&mut self) {
        self.session = match self.load_snapshot() {
            Ok(Some(session)) => {
                tracing::info!(
                    role = ?session.role(),
                    "session restored from snapshot"
                );
                session
            }
            Ok(None) => {
                tracing::debug!("no session snapshot; starting unauthenticated");
                Session::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unusable session snapshot");
                Session::default()
            }
        };
        self.epoch += 1;
    }

    fn load_snapshot(&self) -> Result<Option<Session>, SnapshotError> {
        let Some(record) = self.snapshots.load(&self.key)? else {
            return Ok(None);
        };

        let session = Session::from_snapshot(&record)?;
        if !session.remember_me() {
            return Err(SnapshotError::Corrupt(
                "snapshot was not created with remember-me".to_string(),
            ));
        }

        Ok(Some(session))
    }

    fn persist(&self) {
        let result = self
            .session
            .to_snapshot()
            .and_then(|record| self.snapshots.save(&self.key, &record));

        if let Err(e) = result {
            tracing::error!(error = %e, "failed to persist session snapshot");
        }
    }

    fn erase(&self) {
        if let Err(e) = self.snapshots.clear(&self.key) {
            tracing::error!(error = %e, "failed to delete session snapshot");
        }
    }
}

impl core::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.session)
            .field("key", &self.key)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use adminboard_core::AccountId;

    use super::*;
    use crate::snapshot::{FileSnapshotStore, InMemorySnapshotStore};

    fn identity(id: u64, email: &str) -> Identity {
        Identity {
            id: AccountId::new(id),
            name: format!("Account {id}"),
            email: email.to_string(),
            created: NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
        }
    }

    fn store() -> (Arc<InMemorySnapshotStore>, SessionStore) {
        let snapshots = Arc::new(InMemorySnapshotStore::new());
        let store = SessionStore::new(snapshots.clone());
        (snapshots, store)
    }

    #[test]
    fn default_session_is_unauthenticated() {
        let (_, store) = store();
        let session = store.session();
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
        assert_eq!(session.role(), None);
        assert!(!session.remember_me());
    }

    #[test]
    fn authenticate_derives_role_and_keeps_invariant() {
        let (_, mut store) = store();
        store.authenticate(identity(1, "admin@company.com"), false);

        let session = store.session();
        assert!(session.is_authenticated());
        assert_eq!(session.is_authenticated(), session.current_user().is_some());
        assert_eq!(session.role(), Some(Role::Admin));
    }

    #[test]
    fn remember_me_writes_snapshot() {
        let (snapshots, mut store) = store();
        store.authenticate(identity(2, "manager@company.com"), true);
        assert!(snapshots.contains(DEFAULT_SNAPSHOT_KEY));
    }

    #[test]
    fn without_remember_me_stale_snapshot_is_removed() {
        let (snapshots, mut store) = store();
        store.authenticate(identity(2, "manager@company.com"), true);
        assert!(snapshots.contains(DEFAULT_SNAPSHOT_KEY));

        store.authenticate(identity(14, "user1@company.com"), false);
        assert!(!snapshots.contains(DEFAULT_SNAPSHOT_KEY));
        assert_eq!(store.session().role(), Some(Role::User));
    }

    #[test]
    fn clear_resets_to_default_and_removes_snapshot() {
        let (snapshots, mut store) = store();
        store.authenticate(identity(1, "admin@company.com"), true);

        store.clear();
        assert_eq!(store.session(), &Session::default());
        assert!(!snapshots.contains(DEFAULT_SNAPSHOT_KEY));

        // Idempotent.
        store.clear();
        assert_eq!(store.session(), &Session::default());
    }

    #[test]
    fn clear_removes_snapshot_it_did_not_write() {
        let (snapshots, mut store) = store();
        snapshots.save(DEFAULT_SNAPSHOT_KEY, "left over").unwrap();

        store.clear();
        assert!(!snapshots.contains(DEFAULT_SNAPSHOT_KEY));
    }

    #[test]
    fn restore_reproduces_remembered_session() {
        let (snapshots, mut store) = store();
        store.authenticate(identity(2, "manager@company.com"), true);
        let before = store.session().clone();

        let restored = SessionStore::open(snapshots, DEFAULT_SNAPSHOT_KEY);
        assert_eq!(restored.session(), &before);
        assert_eq!(restored.session().role(), Some(Role::Manager));
        assert!(restored.session().remember_me());
    }

    #[test]
    fn restore_without_snapshot_is_default() {
        let (snapshots, _) = store();
        let restored = SessionStore::open(snapshots, DEFAULT_SNAPSHOT_KEY);
        assert_eq!(restored.session(), &Session::default());
    }

    #[test]
    fn restore_tolerates_garbage() {
        for record in [
            "{not json",
            "null",
            "42",
            r#"{"isAuthenticated":true,"user":null,"rememberMe":true}"#,
            r#"{"isAuthenticated":true,"user":{"id":1,"name":"x","email":"x","role":"Root","created":"2024-01-01"},"rememberMe":true}"#,
        ] {
            let (snapshots, _) = store();
            snapshots.save(DEFAULT_SNAPSHOT_KEY, record).unwrap();

            let restored = SessionStore::open(snapshots, DEFAULT_SNAPSHOT_KEY);
            assert_eq!(restored.session(), &Session::default(), "record: {record}");
        }
    }

    #[test]
    fn restore_survives_unreadable_storage() {
        let dir = tempfile::tempdir().unwrap();
        // The snapshot path names a directory, so reading it fails.
        let snapshots = Arc::new(FileSnapshotStore::new(dir.path()));
        assert!(matches!(
            snapshots.load(DEFAULT_SNAPSHOT_KEY),
            Err(SnapshotError::Io(_))
        ));

        let mut store = SessionStore::open(snapshots, DEFAULT_SNAPSHOT_KEY);
        assert_eq!(store.session(), &Session::default());
        assert_eq!(store.epoch(), 1);

        // Writes fail the same way; the in-memory session still changes.
        store.authenticate(identity(1, "admin@company.com"), true);
        assert_eq!(store.session().role(), Some(Role::Admin));
        store.clear();
        assert!(!store.session().is_authenticated());
    }

    #[test]
    fn restore_ignores_snapshot_without_remember_me() {
        let (snapshots, _) = store();
        let user = CurrentUser::derived(identity(1, "admin@company.com"));
        let record = Session::authenticated(user, false).to_snapshot().unwrap();
        snapshots.save(DEFAULT_SNAPSHOT_KEY, &record).unwrap();

        let restored = SessionStore::open(snapshots, DEFAULT_SNAPSHOT_KEY);
        assert!(!restored.session().is_authenticated());
    }

    #[test]
    fn snapshot_uses_wire_field_names() {
        let user = CurrentUser::derived(identity(2, "manager@company.com"));
        let record = Session::authenticated(user, true).to_snapshot().unwrap();
        let value: serde_json::Value = serde_json::from_str(&record).unwrap();

        assert_eq!(value["isAuthenticated"], true);
        assert_eq!(value["rememberMe"], true);
        assert_eq!(value["user"]["role"], "Manager");
        assert_eq!(value["user"]["created"], "2024-02-03");

        let anonymous: serde_json::Value =
            serde_json::from_str(&Session::default().to_snapshot().unwrap()).unwrap();
        assert_eq!(
            anonymous,
            serde_json::json!({"isAuthenticated": false, "user": null, "rememberMe": false})
        );
    }

    #[test]
    fn custom_key_is_honoured() {
        let (snapshots, store) = store();
        let mut store = store.with_key("dashboard.auth");
        store.authenticate(identity(1, "admin@company.com"), true);

        assert!(snapshots.contains("dashboard.auth"));
        assert!(!snapshots.contains(DEFAULT_SNAPSHOT_KEY));
        assert_eq!(store.snapshot_key(), "dashboard.auth");
    }

    #[test]
    fn every_write_advances_epoch() {
        let (_, mut store) = store();
        let start = store.epoch();

        store.authenticate(identity(1, "admin@company.com"), false);
        assert_eq!(store.epoch(), start + 1);

        store.clear();
        assert_eq!(store.epoch(), start + 2);
    }
}
