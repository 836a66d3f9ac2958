//! `adminboard-auth`: who is signed in, with which role, and what that role
//! may do.
//!
//! This crate is decoupled from rendering and transport. Persistence goes
//! through the [`SnapshotStore`] adapter.

pub mod capabilities;
pub mod identity;
pub mod roles;
pub mod session;
pub mod snapshot;
pub mod verifier;

pub use capabilities::{
    Capability, Feature, can_delete_users, can_view_profile, can_view_reports, can_view_revenue,
    can_view_settings, can_view_users, enabled_features, granted,
};
pub use identity::{CurrentUser, Identity};
pub use roles::{Role, derive_role};
pub use session::{Session, SessionStore};
pub use snapshot::{
    DEFAULT_SNAPSHOT_KEY, FileSnapshotStore, InMemorySnapshotStore, SnapshotError, SnapshotStore,
};
pub use verifier::{CredentialVerifier, VerifyError, verify};
