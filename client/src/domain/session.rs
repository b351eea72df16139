//! Authentication session state and its persisted store.
//!
//! A token is held if and only if a user identity is held, and the pairing
//! is structural: [`Session`] is either `Anonymous` or
//! `Authenticated` with both halves. A partially-restored persisted session
//! therefore cannot flow downstream as authenticated.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::ports::{SessionKey, SessionStorage, SessionStorageError};
use super::user::UserIdentity;

/// Opaque bearer token issued by the remote API.
///
/// ## Invariants
/// - Never empty once trimmed; a blank persisted token restores as no token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(String);

/// Validation error raised when constructing an [`AuthToken`] from a blank
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyToken;

impl fmt::Display for EmptyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "auth token must not be empty")
    }
}

impl std::error::Error for EmptyToken {}

impl AuthToken {
    /// Wrap a server-issued token, rejecting blank values.
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyToken> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(EmptyToken);
        }
        Ok(Self(raw))
    }

    /// Borrow the token for header construction.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Token and identity pair issued together on login or signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Bearer credential attached to every authenticated call.
    pub token: AuthToken,
    /// Identity of the signed-in account.
    pub user: UserIdentity,
}

/// Current authentication state of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    /// No credential; only login and signup are available.
    Anonymous,
    /// Signed in with both a token and an identity.
    Authenticated(AuthenticatedUser),
}

impl Session {
    /// Whether a credential is held.
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Identity of the signed-in account, when present.
    pub const fn user(&self) -> Option<&UserIdentity> {
        match self {
            Self::Authenticated(auth) => Some(&auth.user),
            Self::Anonymous => None,
        }
    }

    /// Bearer credential, when present.
    pub const fn token(&self) -> Option<&AuthToken> {
        match self {
            Self::Authenticated(auth) => Some(&auth.token),
            Self::Anonymous => None,
        }
    }
}

/// Process-wide session service over an injectable storage dependency.
///
/// Constructed once at startup and passed to the call sites that need the
/// identity; the persisted state survives process restarts until an explicit
/// [`SessionStore::logout`] or external storage clearing.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: Arc<S>,
}

impl<S> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S> SessionStore<S> {
    /// Create a store over the given storage adapter.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }
}

impl<S: SessionStorage> SessionStore<S> {
    /// Restore the persisted session.
    ///
    /// Never fails: a missing token, a missing or unparsable user blob, or a
    /// storage read failure all degrade to [`Session::Anonymous`]. When the
    /// token is present but the user blob is not usable, both persisted
    /// entries are discarded so the stored state matches the returned
    /// anonymous session.
    pub fn restore(&self) -> Session {
        let token = match self.read_entry(SessionKey::Token) {
            Some(raw) => match AuthToken::new(raw) {
                Ok(token) => token,
                Err(EmptyToken) => return Session::Anonymous,
            },
            None => return Session::Anonymous,
        };

        let user = self
            .read_entry(SessionKey::User)
            .and_then(|blob| match serde_json::from_str::<UserIdentity>(&blob) {
                Ok(user) => Some(user),
                Err(error) => {
                    debug!(%error, "persisted user blob failed to parse");
                    None
                }
            });

        match user {
            Some(user) => Session::Authenticated(AuthenticatedUser { token, user }),
            None => {
                // A token without an identity must not survive the restore.
                debug!("discarding orphaned session token");
                self.clear_entries();
                Session::Anonymous
            }
        }
    }

    /// Persist a fresh session, replacing any prior one.
    pub fn login(&self, auth: &AuthenticatedUser) -> Result<(), SessionStorageError> {
        let blob = serde_json::to_string(&auth.user)
            .map_err(|error| SessionStorageError::io(error.to_string()))?;
        self.storage.write(SessionKey::Token, auth.token.as_str())?;
        self.storage.write(SessionKey::User, &blob)?;
        Ok(())
    }

    /// Remove both persisted entries. Idempotent.
    pub fn logout(&self) -> Result<(), SessionStorageError> {
        self.storage.remove(SessionKey::Token)?;
        self.storage.remove(SessionKey::User)?;
        Ok(())
    }

    fn read_entry(&self, key: SessionKey) -> Option<String> {
        match self.storage.read(key) {
            Ok(value) => value,
            Err(error) => {
                debug!(%error, key = key.as_str(), "session storage read failed");
                None
            }
        }
    }

    fn clear_entries(&self) {
        for key in [SessionKey::Token, SessionKey::User] {
            if let Err(error) = self.storage.remove(key) {
                debug!(%error, key = key.as_str(), "session storage cleanup failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
