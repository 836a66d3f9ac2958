//! Login submission handling.
//!
//! At most one verification is in flight. A result is applied only if its
//! ticket is still the pending one and the session has not changed since the
//! ticket was issued; otherwise it is discarded.

use serde::Serialize;
use thiserror::Error;

use adminboard_auth::{Identity, Role, SessionStore, VerifyError};
use adminboard_directory::Account;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// Another submission is still being verified.
    #[error("a login is already in progress")]
    InFlight,

    #[error("email is required")]
    EmailRequired,

    #[error("{}", .0.form_message())]
    Verification(#[from] VerifyError),
}

impl LoginError {
    /// Form field the message belongs to.
    pub fn field(&self) -> &'static str {
        "email"
    }

    /// Message for the login form.
    pub fn message(&self) -> String {
        match self {
            LoginError::EmailRequired => "Email is required".to_string(),
            other => other.to_string(),
        }
    }
}

/// Handle for one pending verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginTicket {
    id: u64,
    session_epoch: u64,
    email: String,
    remember_me: bool,
}

impl LoginTicket {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn remember_me(&self) -> bool {
        self.remember_me
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoginOutcome {
    SignedIn { role: Role },
    /// The result arrived after the form or session moved on.
    Discarded,
}

/// Submission lock for the login form.
#[derive(Debug, Default)]
pub struct LoginController {
    pending: Option<u64>,
    next_id: u64,
}

impl LoginController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a verification. Refused while another one is pending.
    pub fn submit(
        &mut self,
        email: &str,
        remember_me: bool,
        session_epoch: u64,
    ) -> Result<LoginTicket, LoginError> {
        if self.pending.is_some() {
            tracing::debug!("login submission ignored; verification pending");
            return Err(LoginError::InFlight);
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(LoginError::EmailRequired);
        }

        self.next_id += 1;
        self.pending = Some(self.next_id);

        Ok(LoginTicket {
            id: self.next_id,
            session_epoch,
            email: email.to_string(),
            remember_me,
        })
    }

    /// The form went away; whatever is pending will be discarded.
    pub fn abandon(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!("pending login abandoned");
        }
    }

    /// Apply a verification result.
    pub fn complete(
        &mut self,
        ticket: LoginTicket,
        result: Result<Account, VerifyError>,
        sessions: &mut SessionStore,
    ) -> Result<LoginOutcome, LoginError> {
        if self.pending != Some(ticket.id) {
            tracing::debug!(ticket = ticket.id, "discarding result for abandoned login");
            return Ok(LoginOutcome::Discarded);
        }
        self.pending = None;

        if sessions.epoch() != ticket.session_epoch {
            tracing::debug!(ticket = ticket.id, "discarding result; session changed meanwhile");
            return Ok(LoginOutcome::Discarded);
        }

        match result {
            Ok(account) => {
                sessions.authenticate(Identity::from(account), ticket.remember_me);
                let role = sessions.session().role().unwrap_or(Role::User);
                Ok(LoginOutcome::SignedIn { role })
            }
            Err(e) => {
                tracing::warn!(error = %e, "login rejected");
                Err(LoginError::Verification(e))
            }
        }
    }
}
