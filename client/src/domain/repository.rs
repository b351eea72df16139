//! Local complaint cache reconciled against the remote store.
//!
//! The collection held here is a projection of the last successful server
//! response per operation, never a speculative pre-write: a failed create
//! must not show a phantom record and a failed load must not blank the view.
//! Overlapping mutations follow last-response-wins; a later
//! [`ComplaintRepository::load`] reconciles any drift.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use super::authorization;
use super::complaint::{ComplaintId, ComplaintRecord};
use super::ports::{ComplaintPayload, ComplaintsApi, ComplaintsApiError};
use super::session::{AuthToken, Session};

const LOAD_FALLBACK: &str = "Failed to load complaints";
const CREATE_FALLBACK: &str = "Failed to create complaint";
const UPDATE_FALLBACK: &str = "Failed to update complaint";
const DELETE_FALLBACK: &str = "Failed to delete complaint";
const SIGNED_OUT_MESSAGE: &str = "Not signed in";

/// User-facing failure raised by repository operations.
///
/// The message is the server's `message` field when one was parsable,
/// otherwise the operation's generic fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RepositoryError {
    message: String,
    #[source]
    source: Option<ComplaintsApiError>,
}

impl RepositoryError {
    fn from_api(error: ComplaintsApiError, fallback: &str) -> Self {
        let message = match &error {
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
        Self {
            message,
            source: Some(error),
        }
    }

    fn signed_out() -> Self {
        Self {
            message: SIGNED_OUT_MESSAGE.to_owned(),
            source: None,
        }
    }

    /// User-facing message for inline rendering.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Result of the confirmation prompt gating a delete.
///
/// The prompt itself is a presentation concern; the repository only consumes
/// the signal and refuses to issue a DELETE without an affirmative one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    /// The user affirmed the prompt.
    Confirmed,
    /// The prompt was dismissed or denied.
    Dismissed,
}

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record was removed server-side and locally.
    Deleted,
    /// No DELETE was issued because the confirmation was withheld.
    Cancelled,
}

/// In-memory complaint collection for the current session.
///
/// Records are held in insertion-recency order, newest first, mirroring the
/// server's listing order.
#[derive(Debug)]
pub struct ComplaintRepository<A> {
    api: Arc<A>,
    complaints: Vec<ComplaintRecord>,
    loading: bool,
    last_error: Option<String>,
}

impl<A> ComplaintRepository<A> {
    /// Create an empty repository over the given API adapter.
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            complaints: Vec::new(),
            loading: false,
            last_error: None,
        }
    }

    /// Records from the last successful reconciliation, newest first.
    pub fn complaints(&self) -> &[ComplaintRecord] {
        &self.complaints
    }

    /// Look up a cached record by identifier.
    pub fn find(&self, id: &ComplaintId) -> Option<&ComplaintRecord> {
        self.complaints.iter().find(|record| &record.id == id)
    }

    /// Whether a load is in flight.
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the most recent failed operation, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

impl<A: ComplaintsApi> ComplaintRepository<A> {
    /// Replace the local collection with the server's scoped listing.
    ///
    /// An anonymous session is a no-op: there is no credential to present,
    /// so no request is made and the cache is left untouched. On failure the
    /// prior collection is preserved and the error slot is set.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the listing call fails.
    pub async fn load(&mut self, session: &Session) -> Result<(), RepositoryError> {
        let Session::Authenticated(auth) = session else {
            debug!("skipping complaint load without a session");
            return Ok(());
        };

        self.loading = true;
        let scope = authorization::list_scope(auth.user.role);
        let outcome = self.api.list(&auth.token, scope).await;
        self.loading = false;

        match outcome {
            Ok(records) => {
                debug!(count = records.len(), ?scope, "complaints reloaded");
                self.complaints = records;
                self.last_error = None;
                Ok(())
            }
            Err(error) => Err(self.record_failure(error, LOAD_FALLBACK)),
        }
    }

    /// Create a record and prepend the server's canonical copy.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on failure; the local collection is left
    /// unchanged so no phantom record is shown.
    pub async fn create(
        &mut self,
        session: &Session,
        payload: &ComplaintPayload,
    ) -> Result<ComplaintRecord, RepositoryError> {
        let auth = self.require_session(session)?;
        match self.api.create(&auth, payload).await {
            Ok(record) => {
                self.complaints.insert(0, record.clone());
                self.last_error = None;
                Ok(record)
            }
            Err(error) => Err(self.record_failure(error, CREATE_FALLBACK)),
        }
    }

    /// Update a record, replacing the matching local copy in place.
    ///
    /// The canonical server record keeps the position of the record it
    /// replaces; a stale identifier that no longer matches locally leaves
    /// the collection as-is until the next load reconciles it.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on failure; the local collection is left
    /// unchanged.
    pub async fn update(
        &mut self,
        session: &Session,
        id: &ComplaintId,
        payload: &ComplaintPayload,
    ) -> Result<ComplaintRecord, RepositoryError> {
        let auth = self.require_session(session)?;
        match self.api.update(&auth, id, payload).await {
            Ok(record) => {
                if let Some(slot) = self
                    .complaints
                    .iter_mut()
                    .find(|existing| existing.id == record.id)
                {
                    *slot = record.clone();
                } else {
                    warn!(id = %record.id, "updated record is not in the local cache");
                }
                self.last_error = None;
                Ok(record)
            }
            Err(error) => Err(self.record_failure(error, UPDATE_FALLBACK)),
        }
    }

    /// Delete a record once the confirmation signal affirms it.
    ///
    /// Without an affirmative confirmation no DELETE is issued and the
    /// collection is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the DELETE call fails.
    pub async fn delete(
        &mut self,
        session: &Session,
        id: &ComplaintId,
        confirmation: DeleteConfirmation,
    ) -> Result<DeleteOutcome, RepositoryError> {
        if confirmation == DeleteConfirmation::Dismissed {
            debug!(%id, "delete dismissed at the confirmation prompt");
            return Ok(DeleteOutcome::Cancelled);
        }

        let auth = self.require_session(session)?;
        match self.api.delete(&auth, id).await {
            Ok(()) => {
                self.complaints.retain(|record| &record.id != id);
                self.last_error = None;
                Ok(DeleteOutcome::Deleted)
            }
            Err(error) => Err(self.record_failure(error, DELETE_FALLBACK)),
        }
    }

    fn require_session(&mut self, session: &Session) -> Result<AuthToken, RepositoryError> {
        session.token().cloned().ok_or_else(|| {
            let error = RepositoryError::signed_out();
            self.last_error = Some(error.message.clone());
            error
        })
    }

    fn record_failure(&mut self, error: ComplaintsApiError, fallback: &str) -> RepositoryError {
        warn!(%error, "complaint operation failed");
        let converted = RepositoryError::from_api(error, fallback);
        self.last_error = Some(converted.message.clone());
        converted
    }
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod repository_tests;
