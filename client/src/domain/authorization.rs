//! Role-scoped authorization policy for complaint records.
//!
//! Pure functions with no side effects: capability checks that were
//! previously scattered per-field live here as one table-driven policy so
//! they can be tested independently of any presentation layer. The server
//! remains the authority; these checks only gate which actions the client
//! offers.

use super::complaint::{ComplaintRecord, ComplaintStatus};
use super::user::{Role, UserIdentity};

/// Which subset of complaint records a role is entitled to list.
///
/// The scope selects the remote listing endpoint; it is not a client-side
/// filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Every record in the system.
    AllRecords,
    /// Only records created by the requesting account.
    MySubmissions,
}

/// Capabilities the current user holds over one complaint record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordCapabilities {
    /// Whether the edit action may be offered.
    pub can_edit: bool,
    /// Whether the delete action may be offered.
    pub can_delete: bool,
    /// Whether the creator identity should be rendered alongside the record.
    pub show_creator_identity: bool,
}

/// Derive the capabilities `user` holds over `record`.
pub fn capabilities(user: &UserIdentity, record: &ComplaintRecord) -> RecordCapabilities {
    RecordCapabilities {
        can_edit: can_edit(user, record),
        can_delete: can_delete(user),
        show_creator_identity: show_creator_identity(user.role),
    }
}

/// Admins edit anything; suppliers edit only records they created.
pub fn can_edit(user: &UserIdentity, record: &ComplaintRecord) -> bool {
    match user.role {
        Role::Admin => true,
        Role::Supplier => record
            .created_by
            .as_ref()
            .is_some_and(|creator| creator.id() == user.id),
        Role::User => false,
    }
}

/// Only admins delete records.
pub const fn can_delete(user: &UserIdentity) -> bool {
    matches!(user.role, Role::Admin)
}

/// Only suppliers raise new complaints.
pub const fn can_create(role: Role) -> bool {
    matches!(role, Role::Supplier)
}

/// Statuses the role may select when editing a record.
///
/// Non-admins are never offered `Rejected`.
pub const fn status_choices(role: Role) -> &'static [ComplaintStatus] {
    match role {
        Role::Admin => &[
            ComplaintStatus::Pending,
            ComplaintStatus::Resolved,
            ComplaintStatus::Rejected,
        ],
        Role::User | Role::Supplier => {
            &[ComplaintStatus::Pending, ComplaintStatus::Resolved]
        }
    }
}

/// Whether the role may set `status` on a record it is editing.
pub fn can_set_status(role: Role, status: ComplaintStatus) -> bool {
    status_choices(role).contains(&status)
}

/// Suppliers only see their own queue, so creator identity is redundant.
pub const fn show_creator_identity(role: Role) -> bool {
    !matches!(role, Role::Supplier)
}

/// Listing scope for the role; suppliers resolve to their own submissions.
pub const fn list_scope(role: Role) -> ListScope {
    match role {
        Role::Supplier => ListScope::MySubmissions,
        Role::User | Role::Admin => ListScope::AllRecords,
    }
}
