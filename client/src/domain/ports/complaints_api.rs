//! Port for the remote complaints API.
//!
//! The trait owns the full remote contract the client depends on: the two
//! auth endpoints, the scoped listing endpoints, and the three record
//! mutations. Adapters map their transport failures into
//! [`ComplaintsApiError`] so services never see `reqwest` types.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::auth::{LoginCredentials, RegistrationForm};
use crate::domain::authorization::ListScope;
use crate::domain::complaint::{ComplaintId, ComplaintRecord, ComplaintStatus};
use crate::domain::session::{AuthToken, AuthenticatedUser};

use super::define_port_error;

define_port_error! {
    /// Errors raised by complaints API adapters.
    pub enum ComplaintsApiError {
        /// The server rejected the credential (HTTP 401).
        Unauthenticated => "not authenticated: {message}",
        /// The server rejected the action for this role (HTTP 403).
        Forbidden => "not permitted: {message}",
        /// Any other non-success response; carries the server's message
        /// field when one was parsable, otherwise an empty string.
        Api => "request rejected: {message}",
        /// The request never produced a response.
        Transport => "transport failed: {message}",
        /// The response body could not be decoded.
        Decode => "invalid response payload: {message}",
    }
}

/// Draft fields submitted when creating or updating a complaint record.
///
/// ## Invariants
/// - `amount_disputed` is non-negative when present; the draft parser
///   enforces this before a payload is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintPayload {
    /// Short summary of the complaint.
    pub title: String,
    /// Longer free-text description.
    pub description: String,
    /// Disputed amount; `None` when the draft field was left empty.
    pub amount_disputed: Option<f64>,
    /// Company the complaint is raised against.
    pub target_company: String,
    /// Contact address at the target company.
    pub target_company_email: String,
    /// Requested workflow status.
    pub status: ComplaintStatus,
}

/// Port for authenticated calls against the remote complaints API.
///
/// The server is authoritative for record identifiers and normalised fields;
/// every mutation returns the canonical record for the caller to reconcile
/// into its local cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintsApi: Send + Sync {
    /// Exchange login credentials for a token and identity.
    async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, ComplaintsApiError>;

    /// Register a new account, returning its first session.
    async fn signup(
        &self,
        form: &RegistrationForm,
    ) -> Result<AuthenticatedUser, ComplaintsApiError>;

    /// List complaint records within the given scope, newest first.
    async fn list(
        &self,
        token: &AuthToken,
        scope: ListScope,
    ) -> Result<Vec<ComplaintRecord>, ComplaintsApiError>;

    /// Create a record; the response carries the canonical server copy.
    async fn create(
        &self,
        token: &AuthToken,
        payload: &ComplaintPayload,
    ) -> Result<ComplaintRecord, ComplaintsApiError>;

    /// Update a record in place; the response carries the canonical copy.
    async fn update(
        &self,
        token: &AuthToken,
        id: &ComplaintId,
        payload: &ComplaintPayload,
    ) -> Result<ComplaintRecord, ComplaintsApiError>;

    /// Delete a record; the response body is not required.
    async fn delete(
        &self,
        token: &AuthToken,
        id: &ComplaintId,
    ) -> Result<(), ComplaintsApiError>;
}
