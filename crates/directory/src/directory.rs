//! Account directory abstraction and its in-memory implementation.

use std::sync::{Arc, RwLock};

use adminboard_core::AccountId;

use crate::seed::mock_accounts;
use crate::{Account, AccountQuery};

/// Read-only access to the account directory.
///
/// Filtering is done client-side: implementations return the listing and
/// callers narrow it with an [`AccountQuery`].
#[async_trait::async_trait]
pub trait AccountDirectory: Send + Sync {
    /// List accounts matching `query`, in directory order.
    async fn list_accounts(&self, query: &AccountQuery) -> Result<Vec<Account>, DirectoryError>;

    /// Fetch one account by id.
    async fn get_account(&self, id: AccountId) -> Result<Option<Account>, DirectoryError> {
        let accounts = self.list_accounts(&AccountQuery::all()).await?;
        Ok(accounts.into_iter().find(|a| a.id == id))
    }
}

/// Directory lookup error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// The directory could not be reached.
    #[error("directory unavailable: {0}")]
    Unavailable(String),

    /// The response could not be decoded into accounts.
    #[error("malformed directory response: {0}")]
    Malformed(String),

    /// Internal lock poisoning.
    #[error("directory state poisoned")]
    Poisoned,
}

/// In-memory directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryAccountDirectory {
    accounts: RwLock<Vec<Account>>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            accounts: RwLock::new(accounts),
        }
    }

    /// Directory pre-populated with the mock listing.
    pub fn seeded() -> Self {
        Self::with_accounts(mock_accounts())
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Decode a JSON array of accounts, as returned by the users endpoint.
    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        let accounts: Vec<Account> =
            serde_json::from_str(json).map_err(|e| DirectoryError::Malformed(e.to_string()))?;
        Ok(Self::with_accounts(accounts))
    }

    /// Insert or replace an account (matched by id).
    pub fn upsert(&self, account: Account) -> Result<(), DirectoryError> {
        let mut accounts = self.accounts.write().map_err(|_| DirectoryError::Poisoned)?;
        match accounts.iter_mut().find(|a| a.id == account.id) {
            Some(existing) => *existing = account,
            None => accounts.push(account),
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn list_accounts(&self, query: &AccountQuery) -> Result<Vec<Account>, DirectoryError> {
        let accounts = self.accounts.read().map_err(|_| DirectoryError::Poisoned)?;
        let listing = query.apply(accounts.iter());
        tracing::debug!(matched = listing.len(), total = accounts.len(), "directory listing");
        Ok(listing)
    }
}
