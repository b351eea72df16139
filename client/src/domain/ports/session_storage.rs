//! Port for the persisted session key-value store.
//!
//! The host storage facility holds exactly two entries: the opaque auth token
//! and the structured user identity blob. Adapters provide the durability
//! (filesystem in production, memory in tests); the [`SessionStore`] service
//! owns the semantics layered on top.
//!
//! [`SessionStore`]: crate::domain::session::SessionStore

use std::collections::HashMap;
use std::sync::Mutex;

use super::define_port_error;

/// Keys of the two persisted session entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    /// Opaque auth token string.
    Token,
    /// JSON-encoded user identity blob.
    User,
}

impl SessionKey {
    /// Stable storage name for the entry.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::User => "user.json",
        }
    }
}

define_port_error! {
    /// Errors raised by session storage adapters.
    pub enum SessionStorageError {
        /// The underlying store could not be read or written.
        Io => "session storage failed: {message}",
    }
}

/// Port for reading and writing the persisted session entries.
///
/// Absent entries are `Ok(None)`, not errors; removal of an absent entry
/// succeeds so logout stays idempotent.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStorage: Send + Sync {
    /// Read the entry, returning `None` when it has never been written.
    fn read(&self, key: SessionKey) -> Result<Option<String>, SessionStorageError>;

    /// Write the entry, replacing any prior value.
    fn write(&self, key: SessionKey, value: &str) -> Result<(), SessionStorageError>;

    /// Remove the entry; succeeds when the entry is already absent.
    fn remove(&self, key: SessionKey) -> Result<(), SessionStorageError>;
}

/// In-memory session storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemorySessionStorage {
    entries: Mutex<HashMap<SessionKey, String>>,
}

impl InMemorySessionStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut HashMap<SessionKey, String>) -> T) -> T {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            // A poisoned lock still holds valid session strings.
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut entries)
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn read(&self, key: SessionKey) -> Result<Option<String>, SessionStorageError> {
        Ok(self.with_entries(|entries| entries.get(&key).cloned()))
    }

    fn write(&self, key: SessionKey, value: &str) -> Result<(), SessionStorageError> {
        self.with_entries(|entries| {
            entries.insert(key, value.to_owned());
        });
        Ok(())
    }

    fn remove(&self, key: SessionKey) -> Result<(), SessionStorageError> {
        self.with_entries(|entries| {
            entries.remove(&key);
        });
        Ok(())
    }
}
