//! Account service orchestrating login, signup, and logout.
//!
//! Sits between the validated credential types and the two driven ports:
//! a successful exchange with the API is persisted through the session store
//! before the session is handed back, so a restart restores the same
//! signed-in state.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use super::auth::{LoginCredentials, RegistrationForm};
use super::ports::{ComplaintsApi, ComplaintsApiError, SessionStorage, SessionStorageError};
use super::session::{Session, SessionStore};

const LOGIN_FALLBACK: &str = "Login failed";
const REGISTRATION_FALLBACK: &str = "Registration failed";

/// Failures surfaced by account operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// The server rejected the credentials or the signup; the message is
    /// surfaced verbatim when one was supplied.
    #[error("{message}")]
    Rejected {
        /// User-facing message for inline rendering.
        message: String,
    },
    /// The session could not be persisted after a successful exchange.
    #[error("session could not be persisted")]
    Persistence(#[source] SessionStorageError),
}

impl AccountError {
    fn rejected(error: &ComplaintsApiError, fallback: &str) -> Self {
        let message = match error {
            ComplaintsApiError::Transport { .. } | ComplaintsApiError::Decode { .. } => {
                fallback.to_owned()
            }
            other => {
                let supplied = other.message().trim();
                if supplied.is_empty() {
                    fallback.to_owned()
                } else {
                    supplied.to_owned()
                }
            }
        };
        Self::Rejected { message }
    }
}

/// Login, signup, and logout flows over the API and session store ports.
#[derive(Debug)]
pub struct AccountService<A, S> {
    api: Arc<A>,
    sessions: SessionStore<S>,
}

impl<A, S> Clone for AccountService<A, S> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            sessions: self.sessions.clone(),
        }
    }
}

impl<A, S> AccountService<A, S> {
    /// Create the service over the given API adapter and session store.
    pub fn new(api: Arc<A>, sessions: SessionStore<S>) -> Self {
        Self { api, sessions }
    }
}

impl<A, S> AccountService<A, S>
where
    A: ComplaintsApi,
    S: SessionStorage,
{
    /// Exchange credentials for a session and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Rejected`] with the server's message (or the
    /// generic login fallback) when the exchange fails; the rejection is
    /// never retried automatically.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Session, AccountError> {
        let auth = self
            .api
            .login(credentials)
            .await
            .map_err(|error| AccountError::rejected(&error, LOGIN_FALLBACK))?;
        self.sessions
            .login(&auth)
            .map_err(AccountError::Persistence)?;
        info!(user = %auth.user.email, role = %auth.user.role, "signed in");
        Ok(Session::Authenticated(auth))
    }

    /// Register a new account and persist its first session.
    ///
    /// Local validation (password confirmation, minimum length) happens when
    /// the [`RegistrationForm`] is constructed, before this call.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Rejected`] with the server's message (or the
    /// generic registration fallback) when the signup fails.
    pub async fn register(&self, form: &RegistrationForm) -> Result<Session, AccountError> {
        let auth = self
            .api
            .signup(form)
            .await
            .map_err(|error| AccountError::rejected(&error, REGISTRATION_FALLBACK))?;
        self.sessions
            .login(&auth)
            .map_err(AccountError::Persistence)?;
        info!(user = %auth.user.email, role = %auth.user.role, "registered");
        Ok(Session::Authenticated(auth))
    }

    /// Discard the persisted session. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Persistence`] when the storage removal fails.
    pub fn logout(&self) -> Result<(), AccountError> {
        self.sessions.logout().map_err(AccountError::Persistence)
    }

    /// Restore whatever session the storage holds.
    pub fn restore(&self) -> Session {
        self.sessions.restore()
    }
}

#[cfg(test)]
#[path = "account_tests.rs"]
mod account_tests;
