use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use adminboard_core::AccountId;
use adminboard_directory::Account;

use crate::{Role, derive_role};

/// A verified identity, before a role is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub created: NaiveDate,
}

impl From<&Account> for Identity {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            created: account.created,
        }
    }
}

impl From<Account> for Identity {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            created: account.created,
        }
    }
}

/// The signed-in user as held by a session.
///
/// Fields are read-only once constructed; the role in particular never
/// changes for the life of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    id: AccountId,
    name: String,
    email: String,
    role: Role,
    created: NaiveDate,
}

impl CurrentUser {
    /// Attach an explicit role to an identity.
    pub fn new(identity: Identity, role: Role) -> Self {
        Self {
            id: identity.id,
            name: identity.name,
            email: identity.email,
            role,
            created: identity.created,
        }
    }

    /// Attach the role derived from the identity's email.
    pub fn derived(identity: Identity) -> Self {
        let role = derive_role(&identity.email);
        Self::new(identity, role)
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created(&self) -> NaiveDate {
        self.created
    }
}
