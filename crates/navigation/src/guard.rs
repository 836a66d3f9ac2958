//! Route guard state machine.

use serde::Serialize;

use adminboard_auth::{Role, Session};

use crate::routes::{LOGIN_PATH, UNAUTHORIZED_PATH};

/// Outcome of guarding one protected route.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    /// No one is signed in.
    Unauthenticated,
    /// Signed in, but the role is not among the required roles.
    Forbidden,
    Allowed,
}

impl GuardState {
    pub fn is_allowed(self) -> bool {
        self == GuardState::Allowed
    }
}

/// What the view layer should do with a navigation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "snake_case")]
pub enum Decision {
    /// Render the requested view.
    Allow,
    /// Replace the current location with this path.
    RedirectTo(&'static str),
}

impl From<GuardState> for Decision {
    fn from(state: GuardState) -> Self {
        match state {
            GuardState::Unauthenticated => Decision::RedirectTo(LOGIN_PATH),
            GuardState::Forbidden => Decision::RedirectTo(UNAUTHORIZED_PATH),
            GuardState::Allowed => Decision::Allow,
        }
    }
}

/// Guard a protected route.
///
/// - No IO
/// - No panics
/// - Unauthenticated takes precedence over any role requirement
pub fn guard(session: &Session, required_roles: &[Role]) -> GuardState {
    let Some(role) = session.role() else {
        return GuardState::Unauthenticated;
    };

    if required_roles.contains(&role) {
        GuardState::Allowed
    } else {
        GuardState::Forbidden
    }
}
