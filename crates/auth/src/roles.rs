use core::str::FromStr;

use serde::{Deserialize, Serialize};

use adminboard_core::DomainError;

/// Role held by an authenticated session.
///
/// Closed set. A role is fixed at login and only changes through a new login.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Manager,
    User,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::User => "User",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::validation(format!("unknown role '{s}'")))
    }
}

const ADMIN_SUFFIX: &str = "admin@company.com";
const MANAGER_SUFFIX: &str = "manager@company.com";

/// Derive the session role from a login email.
///
/// Case-insensitive suffix match: `...admin@company.com` is `Admin`,
/// `...manager@company.com` is `Manager`, anything else is `User`.
/// Pure and total.
pub fn derive_role(email: &str) -> Role {
    let lower = email.to_lowercase();

    if lower.ends_with(ADMIN_SUFFIX) {
        Role::Admin
    } else if lower.ends_with(MANAGER_SUFFIX) {
        Role::Manager
    } else {
        Role::User
    }
}
