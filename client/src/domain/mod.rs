//! Domain types and services for the complaints workflow.
//!
//! Everything here is transport agnostic: the session store, authorization
//! policy, complaint repository, and form state machine talk to the outside
//! world only through the traits in [`ports`].

pub mod auth;
pub mod authorization;
pub mod complaint;
pub mod form;
pub mod ports;
pub mod repository;
pub mod session;
pub mod user;

mod account;

pub use account::{AccountError, AccountService};
pub use auth::{
    CredentialsValidationError, LoginCredentials, MIN_PASSWORD_LENGTH, RegistrationForm,
};
pub use authorization::{ListScope, RecordCapabilities};
pub use complaint::{ComplaintId, ComplaintRecord, ComplaintStatus, CreatorRef};
pub use form::{ComplaintForm, FormDraft, FormError, FormField, SubmitIntent};
pub use repository::{
    ComplaintRepository, DeleteConfirmation, DeleteOutcome, RepositoryError,
};
pub use session::{AuthToken, AuthenticatedUser, Session, SessionStore};
pub use user::{Role, UserIdentity};
