//! Wire DTOs for the remote complaints API.
//!
//! The server speaks camelCase JSON with Mongo-style `_id` identifiers on
//! records and creators but a plain `id` on the authenticated user. These
//! types own that mapping and the conversion into validated domain values;
//! unknown server fields (timestamps, version counters) are ignored.

use serde::Deserialize;

use crate::domain::complaint::{ComplaintId, ComplaintRecord, ComplaintStatus, CreatorRef};
use crate::domain::session::{AuthToken, AuthenticatedUser};
use crate::domain::user::UserIdentity;

/// `{ token, user }` body returned by the two auth endpoints.
#[derive(Debug, Deserialize)]
pub(super) struct AuthResponseDto {
    token: String,
    user: UserIdentity,
}

impl AuthResponseDto {
    pub(super) fn into_domain(self) -> Result<AuthenticatedUser, String> {
        let token = AuthToken::new(self.token).map_err(|error| error.to_string())?;
        Ok(AuthenticatedUser {
            token,
            user: self.user,
        })
    }
}

/// `{ complaints: [...] }` envelope returned by the listing endpoints.
#[derive(Debug, Deserialize)]
pub(super) struct ListResponseDto {
    #[serde(default)]
    complaints: Vec<ComplaintDto>,
}

impl ListResponseDto {
    pub(super) fn into_domain(self) -> Result<Vec<ComplaintRecord>, String> {
        self.complaints
            .into_iter()
            .map(ComplaintDto::into_domain)
            .collect()
    }
}

/// `{ complaint: {...} }` envelope returned by create and update.
#[derive(Debug, Deserialize)]
pub(super) struct MutationResponseDto {
    complaint: ComplaintDto,
}

impl MutationResponseDto {
    pub(super) fn into_domain(self) -> Result<ComplaintRecord, String> {
        self.complaint.into_domain()
    }
}

/// `{ message }` body attached to non-success responses.
#[derive(Debug, Deserialize)]
pub(super) struct MessageDto {
    pub(super) message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ComplaintDto {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    amount_disputed: Option<f64>,
    #[serde(default)]
    target_company: Option<String>,
    #[serde(default)]
    target_company_email: Option<String>,
    status: ComplaintStatus,
    #[serde(default)]
    created_by: Option<CreatorDto>,
}

impl ComplaintDto {
    fn into_domain(self) -> Result<ComplaintRecord, String> {
        let created_by = self
            .created_by
            .map(CreatorDto::into_domain)
            .transpose()?;
        Ok(ComplaintRecord {
            id: ComplaintId::new(self.id),
            title: self.title,
            description: self.description.unwrap_or_default(),
            amount_disputed: self.amount_disputed,
            target_company: self.target_company.unwrap_or_default(),
            target_company_email: self.target_company_email.unwrap_or_default(),
            status: self.status,
            created_by,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreatorDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    company_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl CreatorDto {
    fn into_domain(self) -> Result<CreatorRef, String> {
        CreatorRef::try_new(self.id, self.name, self.company_name, self.email)
            .map_err(|error| error.to_string())
    }
}
