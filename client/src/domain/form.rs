//! Create/edit form draft and its submission lifecycle.
//!
//! The form is a small state machine over {idle, editing, submitting,
//! error}. It never talks to the network itself: submitting yields a
//! [`SubmitIntent`] for the caller to run against the repository, and the
//! caller reports the outcome back through [`ComplaintForm::resolve_success`]
//! or [`ComplaintForm::resolve_failure`]. A failed submission keeps the
//! draft so the user can correct and resubmit.

use std::fmt;

use super::authorization;
use super::complaint::{ComplaintId, ComplaintRecord, ComplaintStatus};
use super::ports::ComplaintPayload;
use super::user::Role;

/// Mutable in-progress form data for a create or edit action.
///
/// Distinct from the persisted record: `amount_disputed` stays a raw string
/// (empty when unset) until submission builds a typed payload from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    /// Short summary of the complaint.
    pub title: String,
    /// Longer free-text description.
    pub description: String,
    /// Raw disputed-amount input; empty when unset.
    pub amount_disputed: String,
    /// Company the complaint is raised against.
    pub target_company: String,
    /// Contact address at the target company.
    pub target_company_email: String,
    /// Selected workflow status.
    pub status: ComplaintStatus,
    /// Identifier of the record being edited; absent for a create intent.
    pub editing_target_id: Option<ComplaintId>,
}

impl FormDraft {
    fn from_record(record: &ComplaintRecord) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            amount_disputed: record
                .amount_disputed
                .map(|amount| amount.to_string())
                .unwrap_or_default(),
            target_company: record.target_company.clone(),
            target_company_email: record.target_company_email.clone(),
            status: record.status,
            editing_target_id: Some(record.id.clone()),
        }
    }

    fn parse_amount(&self) -> Result<Option<f64>, FormError> {
        let raw = self.amount_disputed.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let amount: f64 = raw
            .parse()
            .map_err(|_| FormError::InvalidAmount)?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(FormError::InvalidAmount);
        }
        Ok(Some(amount))
    }

    fn into_payload(self) -> Result<ComplaintPayload, FormError> {
        let amount_disputed = self.parse_amount()?;
        Ok(ComplaintPayload {
            title: self.title,
            description: self.description,
            amount_disputed,
            target_company: self.target_company,
            target_company_email: self.target_company_email,
            status: self.status,
        })
    }
}

/// Editable text fields of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Complaint title.
    Title,
    /// Complaint description.
    Description,
    /// Raw disputed-amount input.
    AmountDisputed,
    /// Target company name.
    TargetCompany,
    /// Target company contact address.
    TargetCompanyEmail,
}

/// Local validation failures raised by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The disputed amount is not a non-negative number.
    InvalidAmount,
    /// The role may not select the requested status.
    StatusNotPermitted,
    /// Submission was requested outside the editing state.
    NotEditing,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount => {
                write!(f, "Amount disputed must be a non-negative number")
            }
            Self::StatusNotPermitted => {
                write!(f, "This status is not available for your role")
            }
            Self::NotEditing => write!(f, "No draft is being edited"),
        }
    }
}

impl std::error::Error for FormError {}

/// Network call the caller must run for a submitted draft.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitIntent {
    /// POST the payload as a new record.
    Create(ComplaintPayload),
    /// PUT the payload over the identified record.
    Update(ComplaintId, ComplaintPayload),
}

/// Create/edit form state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ComplaintForm {
    /// No draft is open.
    #[default]
    Idle,
    /// A draft is being edited.
    Editing {
        /// The in-progress draft.
        draft: FormDraft,
    },
    /// A submission is in flight; further edits are ignored until resolved.
    Submitting {
        /// The submitted draft, kept for error recovery.
        draft: FormDraft,
    },
    /// The last submission failed; the draft is preserved for correction.
    Error {
        /// The draft as it was submitted.
        draft: FormDraft,
        /// User-facing failure message rendered inline.
        message: String,
    },
}

impl ComplaintForm {
    /// Open an empty draft for a create intent, discarding any prior draft.
    pub fn begin_create(&mut self) {
        *self = Self::Editing {
            draft: FormDraft::default(),
        };
    }

    /// Open a draft populated from an existing record.
    ///
    /// Absent description and amount fields default to the empty string.
    pub fn begin_edit(&mut self, record: &ComplaintRecord) {
        *self = Self::Editing {
            draft: FormDraft::from_record(record),
        };
    }

    /// Apply a single field change.
    ///
    /// In the error state any change clears the message and returns to
    /// editing. Changes outside an open draft are ignored.
    pub fn change(&mut self, field: FormField, value: &str) {
        self.resume_editing();
        if let Self::Editing { draft } = self {
            let slot = match field {
                FormField::Title => &mut draft.title,
                FormField::Description => &mut draft.description,
                FormField::AmountDisputed => &mut draft.amount_disputed,
                FormField::TargetCompany => &mut draft.target_company,
                FormField::TargetCompanyEmail => &mut draft.target_company_email,
            };
            value.clone_into(slot);
        }
    }

    /// Select a status, subject to the role's permitted choices.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::StatusNotPermitted`] when the authorization
    /// policy does not offer `status` to `role`; the draft is unchanged.
    pub fn set_status(&mut self, role: Role, status: ComplaintStatus) -> Result<(), FormError> {
        if !authorization::can_set_status(role, status) {
            return Err(FormError::StatusNotPermitted);
        }
        self.resume_editing();
        if let Self::Editing { draft } = self {
            draft.status = status;
        }
        Ok(())
    }

    /// Move the open draft into the submitting state.
    ///
    /// Returns the intent the caller must run: create when no editing target
    /// is set, update otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotEditing`] outside the editing state and
    /// [`FormError::InvalidAmount`] when the amount field does not parse; in
    /// the latter case the draft stays open with the error attached.
    pub fn submit(&mut self) -> Result<SubmitIntent, FormError> {
        let Self::Editing { draft } = self else {
            return Err(FormError::NotEditing);
        };
        let draft = draft.clone();
        let target = draft.editing_target_id.clone();
        match draft.clone().into_payload() {
            Ok(payload) => {
                *self = Self::Submitting { draft };
                Ok(match target {
                    Some(id) => SubmitIntent::Update(id, payload),
                    None => SubmitIntent::Create(payload),
                })
            }
            Err(error) => {
                *self = Self::Error {
                    draft,
                    message: error.to_string(),
                };
                Err(error)
            }
        }
    }

    /// Record a successful submission: the draft is reset and the form
    /// returns to idle (closing any modal is the presentation layer's job,
    /// triggered by this transition).
    pub fn resolve_success(&mut self) {
        if matches!(self, Self::Submitting { .. }) {
            *self = Self::Idle;
        }
    }

    /// Record a failed submission, preserving the draft for correction.
    pub fn resolve_failure(&mut self, message: impl Into<String>) {
        if let Self::Submitting { draft } = self {
            *self = Self::Error {
                draft: draft.clone(),
                message: message.into(),
            };
        }
    }

    /// Discard the draft unconditionally, from any state.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    /// The open draft, when one exists.
    pub const fn draft(&self) -> Option<&FormDraft> {
        match self {
            Self::Editing { draft } | Self::Submitting { draft } | Self::Error { draft, .. } => {
                Some(draft)
            }
            Self::Idle => None,
        }
    }

    /// The inline error message, when the last submission failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    fn resume_editing(&mut self) {
        if let Self::Error { draft, .. } = self {
            *self = Self::Editing {
                draft: draft.clone(),
            };
        }
    }
}
