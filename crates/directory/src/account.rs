//! Directory account records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use adminboard_core::AccountId;

// ─────────────────────────────────────────────────────────────────────────────
// Account Status
// ─────────────────────────────────────────────────────────────────────────────

/// Activation status of a directory account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AccountStatus {
    /// Account may sign in.
    #[default]
    Active,
    /// Account exists but is not allowed to sign in.
    Inactive,
}

impl AccountStatus {
    pub fn is_active(self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}

impl core::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccountStatus::Active => write!(f, "Active"),
            AccountStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Account Role (directory hint)
// ─────────────────────────────────────────────────────────────────────────────

/// Role label as recorded by the directory.
///
/// This is a display hint only. The session role is derived at login time and
/// never read from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountRole {
    Admin,
    Manager,
    #[serde(alias = "User")]
    Employee,
}

impl core::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccountRole::Admin => write!(f, "Admin"),
            AccountRole::Manager => write!(f, "Manager"),
            AccountRole::Employee => write!(f, "Employee"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Account
// ─────────────────────────────────────────────────────────────────────────────

/// A directory record identifying a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub role: AccountRole,
    pub status: AccountStatus,
    pub created: NaiveDate,
}

impl Account {
    /// Case-insensitive email comparison.
    ///
    /// Uses full Unicode lowercasing so it agrees with role derivation.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.trim().to_lowercase()
    }
}
