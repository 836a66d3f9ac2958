//! Credential verification against the account directory.
//!
//! Verification checks that an account exists and is active. It does not
//! check a password; the directory holds none.

use std::sync::Arc;

use thiserror::Error;

use adminboard_directory::{Account, AccountDirectory, AccountQuery, DirectoryError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("account not found")]
    AccountNotFound,

    #[error("account is inactive")]
    AccountInactive,

    #[error("account lookup failed: {0}")]
    Transport(#[from] DirectoryError),
}

impl VerifyError {
    /// Message shown next to the login form's email field.
    pub fn form_message(&self) -> &'static str {
        match self {
            VerifyError::AccountNotFound => "User not found",
            VerifyError::AccountInactive => "User account is inactive",
            VerifyError::Transport(_) => "Login failed. Please try again.",
        }
    }

    /// Whether the user can fix this by changing their input.
    pub fn is_user_correctable(&self) -> bool {
        !matches!(self, VerifyError::Transport(_))
    }
}

/// Find the first account whose email matches (case-insensitive) and check
/// that it is active.
///
/// - No IO
/// - No side effects
pub fn verify<'a>(email: &str, accounts: &'a [Account]) -> Result<&'a Account, VerifyError> {
    let account = accounts
        .iter()
        .find(|a| a.has_email(email))
        .ok_or(VerifyError::AccountNotFound)?;

    if !account.status.is_active() {
        return Err(VerifyError::AccountInactive);
    }

    Ok(account)
}

/// Directory-backed verifier: fetches the listing, then runs [`verify`].
#[derive(Clone)]
pub struct CredentialVerifier {
    directory: Arc<dyn AccountDirectory>,
}

impl CredentialVerifier {
    pub fn new(directory: Arc<dyn AccountDirectory>) -> Self {
        Self { directory }
    }

    pub async fn verify(&self, email: &str) -> Result<Account, VerifyError> {
        let accounts = self.directory.list_accounts(&AccountQuery::all()).await?;
        let account = verify(email, &accounts)?;
        Ok(account.clone())
    }
}

impl core::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CredentialVerifier").finish_non_exhaustive()
    }
}
