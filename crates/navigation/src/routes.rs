//! Route table.
//!
//! Each route names the capability it requires; the roles allowed through the
//! guard are derived from that capability rather than listed by hand.

use serde::Serialize;
use thiserror::Error;

use adminboard_auth::{Capability, Role, Session};
use adminboard_core::{AccountId, DomainError};

use crate::guard::{Decision, GuardState, guard};

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("no route matches '{0}'")]
    NoRoute(String),

    #[error("invalid route parameter: {0}")]
    InvalidParam(#[from] DomainError),
}

/// Who may enter a route.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "capability", rename_all = "snake_case")]
pub enum Access {
    /// Bypasses the guard entirely.
    Public,
    /// Any signed-in role.
    Authenticated,
    /// Roles holding the capability.
    Capability(Capability),
}

impl Access {
    /// Roles the guard lets through; `None` for public routes.
    pub fn required_roles(self) -> Option<Vec<Role>> {
        match self {
            Access::Public => None,
            Access::Authenticated => Some(Role::ALL.to_vec()),
            Access::Capability(capability) => Some(capability.roles()),
        }
    }

    pub fn capability(self) -> Option<Capability> {
        match self {
            Access::Capability(capability) => Some(capability),
            Access::Public | Access::Authenticated => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Route
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub pattern: &'static str,
    pub access: Access,
    /// Rendered inside the protected layout shell.
    pub nested: bool,
}

impl Route {
    pub const fn public(pattern: &'static str) -> Self {
        Self {
            pattern,
            access: Access::Public,
            nested: false,
        }
    }

    pub const fn nested(pattern: &'static str, access: Access) -> Self {
        Self {
            pattern,
            access,
            nested: true,
        }
    }

    /// Match `path` against this route's pattern.
    ///
    /// Literal segments compare case-insensitively; `:name` segments capture
    /// any non-empty segment.
    pub fn match_path(&self, path: &str) -> Option<Vec<(&'static str, String)>> {
        let wanted: Vec<&'static str> = segments(self.pattern).collect();
        let actual: Vec<&str> = segments(path).collect();

        if wanted.len() != actual.len() {
            return None;
        }

        let mut params = Vec::new();
        for (pattern, segment) in wanted.into_iter().zip(actual) {
            match pattern.strip_prefix(':') {
                Some(name) => params.push((name, segment.to_string())),
                None if pattern.eq_ignore_ascii_case(segment) => {}
                None => return None,
            }
        }

        Some(params)
    }
}

/// Path segments without query, fragment, or empty pieces.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|s| !s.is_empty())
}

/// A resolved route plus its captured parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: Vec<(&'static str, String)>,
}

impl RouteMatch<'_> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The `:id` parameter as an account id (user detail routes).
    pub fn account_id(&self) -> Result<AccountId, RoutingError> {
        let raw = self
            .param("id")
            .ok_or_else(|| DomainError::validation("route has no :id parameter"))?;
        Ok(raw.parse()?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Route table
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTable {
    /// Requirement of the layout shell wrapping every nested route.
    pub layout: Access,
    pub routes: Vec<Route>,
}

impl RouteTable {
    /// The dashboard's routes.
    pub fn dashboard() -> Self {
        Self {
            layout: Access::Authenticated,
            routes: vec![
                Route::public(LOGIN_PATH),
                Route::public(UNAUTHORIZED_PATH),
                Route::nested("/", Access::Authenticated),
                Route::nested("/users", Access::Capability(Capability::ViewUsers)),
                Route::nested("/users/:id", Access::Capability(Capability::ViewUsers)),
                Route::nested("/reports", Access::Capability(Capability::ViewReports)),
                Route::nested("/settings", Access::Capability(Capability::ViewSettings)),
                Route::nested("/profile", Access::Capability(Capability::ViewProfile)),
            ],
        }
    }

    /// First route whose pattern matches `path`.
    pub fn resolve(&self, path: &str) -> Result<RouteMatch<'_>, RoutingError> {
        self.routes
            .iter()
            .find_map(|route| {
                route
                    .match_path(path)
                    .map(|params| RouteMatch { route, params })
            })
            .ok_or_else(|| RoutingError::NoRoute(path.to_string()))
    }

    /// Route declared with exactly this pattern.
    pub fn by_pattern(&self, pattern: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.pattern == pattern)
    }

    /// Guard state for entering `path`: the layout first, then the route.
    pub fn evaluate(&self, session: &Session, path: &str) -> Result<Option<GuardState>, RoutingError> {
        let matched = self.resolve(path)?;
        let route = matched.route;

        let Some(required) = route.access.required_roles() else {
            return Ok(None);
        };

        if route.nested {
            if let Some(layout_roles) = self.layout.required_roles() {
                let outer = guard(session, &layout_roles);
                if !outer.is_allowed() {
                    return Ok(Some(outer));
                }
            }
        }

        Ok(Some(guard(session, &required)))
    }

    /// Decide what to do with a navigation to `path`.
    pub fn navigate(&self, session: &Session, path: &str) -> Result<Decision, RoutingError> {
        let decision = match self.evaluate(session, path)? {
            None => Decision::Allow,
            Some(state) => Decision::from(state),
        };

        tracing::debug!(path, role = ?session.role(), ?decision, "navigation decision");
        Ok(decision)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::dashboard()
    }
}
