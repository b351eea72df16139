//! Complaint record data model.
//!
//! The authoritative copy of every record lives server-side; the structs here
//! are the client's cached projection of the last canonical server response.

use serde::{Deserialize, Serialize};

/// Opaque server-assigned complaint identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComplaintId(String);

impl ComplaintId {
    /// Wrap a server-assigned identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ComplaintId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Workflow status of a complaint record.
///
/// Serialised capitalised on the wire (`"Pending"`, `"Resolved"`,
/// `"Rejected"`), matching the server's status vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintStatus {
    /// Awaiting a resolution; the initial status for new records.
    #[default]
    Pending,
    /// Closed with a resolution in the complainant's favour.
    Resolved,
    /// Closed without a resolution; admin-only outcome.
    Rejected,
}

impl ComplaintStatus {
    /// Wire name for this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Resolved => "Resolved",
            Self::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to the account that created a complaint record.
///
/// ## Invariants
/// - At least one human-readable field (name, company name, or email) is
///   present, so [`CreatorRef::display_label`] always has a fallback.
/// - Read-only from the client's perspective; never sent back to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorRef {
    id: String,
    name: Option<String>,
    company_name: Option<String>,
    email: Option<String>,
}

/// Validation error raised when a creator reference has no displayable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCreatorLabel;

impl std::fmt::Display for MissingCreatorLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "creator reference must carry a name, company name, or email"
        )
    }
}

impl std::error::Error for MissingCreatorLabel {}

impl CreatorRef {
    /// Build a creator reference, validating the display-fallback invariant.
    pub fn try_new(
        id: impl Into<String>,
        name: Option<String>,
        company_name: Option<String>,
        email: Option<String>,
    ) -> Result<Self, MissingCreatorLabel> {
        let blank = |value: &Option<String>| {
            value
                .as_deref()
                .is_none_or(|label| label.trim().is_empty())
        };
        if blank(&name) && blank(&company_name) && blank(&email) {
            return Err(MissingCreatorLabel);
        }
        Ok(Self {
            id: id.into(),
            name,
            company_name,
            email,
        })
    }

    /// Stable identifier of the creating account.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Human-readable label: name, falling back to company name, then email.
    pub fn display_label(&self) -> &str {
        fn non_blank(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|label| !label.trim().is_empty())
        }
        non_blank(&self.name)
            .or_else(|| non_blank(&self.company_name))
            .or_else(|| non_blank(&self.email))
            .unwrap_or_default()
    }
}

/// Complaint record as last reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplaintRecord {
    /// Server-assigned identifier.
    pub id: ComplaintId,
    /// Short summary of the complaint.
    pub title: String,
    /// Longer free-text description; empty when the creator left it blank.
    pub description: String,
    /// Disputed amount, absent when the complaint carries no monetary claim.
    pub amount_disputed: Option<f64>,
    /// Company the complaint is raised against.
    pub target_company: String,
    /// Contact address at the target company.
    pub target_company_email: String,
    /// Current workflow status.
    pub status: ComplaintStatus,
    /// Creating account, when the server included the reference.
    pub created_by: Option<CreatorRef>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("Ada"), Some("Acme"), Some("a@x.test"), "Ada")]
    #[case(None, Some("Acme"), Some("a@x.test"), "Acme")]
    #[case(None, None, Some("a@x.test"), "a@x.test")]
    #[case(Some("  "), Some("Acme"), None, "Acme")]
    fn display_label_falls_back_in_order(
        #[case] name: Option<&str>,
        #[case] company: Option<&str>,
        #[case] email: Option<&str>,
        #[case] expected: &str,
    ) {
        let creator = CreatorRef::try_new(
            "c-1",
            name.map(str::to_owned),
            company.map(str::to_owned),
            email.map(str::to_owned),
        )
        .expect("at least one label is present");
        assert_eq!(creator.display_label(), expected);
    }

    #[test]
    fn creator_without_any_label_is_rejected() {
        let error = CreatorRef::try_new("c-1", None, Some("   ".to_owned()), None)
            .expect_err("blank labels must fail validation");
        assert_eq!(error, MissingCreatorLabel);
    }

    #[rstest]
    #[case(ComplaintStatus::Pending, "\"Pending\"")]
    #[case(ComplaintStatus::Resolved, "\"Resolved\"")]
    #[case(ComplaintStatus::Rejected, "\"Rejected\"")]
    fn statuses_serialise_capitalised(#[case] status: ComplaintStatus, #[case] expected: &str) {
        let encoded = serde_json::to_string(&status).expect("status should encode");
        assert_eq!(encoded, expected);
    }
}
