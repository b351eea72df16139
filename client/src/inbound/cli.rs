//! Command-line driving adapter.
//!
//! Replaces the page routing of a graphical client: each subcommand maps the
//! authenticated/unauthenticated status to the operations it may run, renders
//! records according to the authorization policy, and feeds the form state
//! machine exactly the way an interactive shell would.

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::domain::authorization;
use crate::domain::{
    AccountError, AccountService, ComplaintForm, ComplaintId, ComplaintRepository,
    ComplaintStatus, CredentialsValidationError, DeleteConfirmation, DeleteOutcome, FormError,
    FormField, LoginCredentials, RegistrationForm, RepositoryError, Role, Session, SubmitIntent,
};
use crate::domain::ports::{ComplaintsApi, SessionStorage};

/// Complaints desk client.
#[derive(Debug, Parser)]
#[command(name = "complaints", version, about)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Account role accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    /// Regular account holder.
    User,
    /// Supplier raising complaints.
    Supplier,
    /// Administrator.
    Admin,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::User => Self::User,
            RoleArg::Supplier => Self::Supplier,
            RoleArg::Admin => Self::Admin,
        }
    }
}

/// Workflow status accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Awaiting a resolution.
    Pending,
    /// Closed in the complainant's favour.
    Resolved,
    /// Closed without a resolution (admin only).
    Rejected,
}

impl From<StatusArg> for ComplaintStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Pending => Self::Pending,
            StatusArg::Resolved => Self::Resolved,
            StatusArg::Rejected => Self::Rejected,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and persist the session.
    Login {
        /// Account email address.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Register a new account and sign in.
    Register {
        /// Display name for the account.
        #[arg(long)]
        name: String,
        /// Account email address.
        #[arg(long)]
        email: String,
        /// Requested role.
        #[arg(long, value_enum, default_value = "user")]
        role: RoleArg,
        /// Account password.
        #[arg(long)]
        password: String,
        /// Password confirmation; must match.
        #[arg(long)]
        confirm_password: String,
    },
    /// Discard the persisted session.
    Logout,
    /// Show the signed-in identity.
    Whoami,
    /// List complaint records within the role's scope.
    List,
    /// Raise a new complaint (suppliers only).
    Create {
        /// Short summary of the complaint.
        #[arg(long)]
        title: String,
        /// Longer free-text description.
        #[arg(long, default_value = "")]
        description: String,
        /// Disputed amount.
        #[arg(long)]
        amount: Option<String>,
        /// Company the complaint is raised against.
        #[arg(long)]
        target_company: String,
        /// Contact address at the target company.
        #[arg(long)]
        target_company_email: String,
    },
    /// Edit an existing complaint.
    Update {
        /// Identifier of the record to edit.
        id: String,
        /// Replacement title.
        #[arg(long)]
        title: Option<String>,
        /// Replacement description.
        #[arg(long)]
        description: Option<String>,
        /// Replacement disputed amount.
        #[arg(long)]
        amount: Option<String>,
        /// Replacement target company.
        #[arg(long)]
        target_company: Option<String>,
        /// Replacement contact address.
        #[arg(long)]
        target_company_email: Option<String>,
        /// Replacement status, subject to the role's choices.
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Delete a complaint (admins only).
    Delete {
        /// Identifier of the record to delete.
        id: String,
        /// Affirm the deletion; without this flag nothing is deleted.
        #[arg(long)]
        yes: bool,
    },
}

/// Failures surfaced by command execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Local credential validation failed before any network call.
    #[error("{0}")]
    Validation(#[from] CredentialsValidationError),
    /// The account operation was rejected.
    #[error("{0}")]
    Account(#[from] AccountError),
    /// The repository operation failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),
    /// The form refused the draft.
    #[error("{0}")]
    Form(#[from] FormError),
    /// The command requires a signed-in session.
    #[error("Not signed in; run `complaints login` first")]
    NotSignedIn,
    /// The role may not run this command.
    #[error("{message}")]
    NotPermitted {
        /// User-facing refusal message.
        message: String,
    },
    /// No cached record matches the given identifier.
    #[error("No complaint with id {id}")]
    UnknownRecord {
        /// The identifier that failed to match.
        id: String,
    },
}

/// Execute one subcommand against the wired services.
///
/// Returns the lines to print; all failures come back as [`CommandError`]
/// messages suitable for inline rendering.
///
/// # Errors
///
/// Returns [`CommandError`] when validation, authorization, or the remote
/// call fails.
pub async fn run<A, S>(
    command: Command,
    account: &AccountService<A, S>,
    repository: &mut ComplaintRepository<A>,
) -> Result<Vec<String>, CommandError>
where
    A: ComplaintsApi,
    S: SessionStorage,
{
    match command {
        Command::Login { email, password } => {
            let credentials = LoginCredentials::try_from_parts(&email, &password)?;
            let session = account.login(&credentials).await?;
            Ok(greeting(&session))
        }
        Command::Register {
            name,
            email,
            role,
            password,
            confirm_password,
        } => {
            let form = RegistrationForm::try_from_parts(
                &name,
                &email,
                role.into(),
                &password,
                &confirm_password,
            )?;
            let session = account.register(&form).await?;
            Ok(greeting(&session))
        }
        Command::Logout => {
            account.logout()?;
            Ok(vec!["Signed out".to_owned()])
        }
        Command::Whoami => {
            let session = account.restore();
            Ok(greeting(&session))
        }
        Command::List => {
            let session = signed_in(account)?;
            repository.load(&session).await?;
            Ok(render_listing(&session, repository))
        }
        Command::Create {
            title,
            description,
            amount,
            target_company,
            target_company_email,
        } => {
            let session = signed_in(account)?;
            let role = session_role(&session)?;
            if !authorization::can_create(role) {
                return Err(CommandError::NotPermitted {
                    message: "Only suppliers raise complaints".to_owned(),
                });
            }

            let mut form = ComplaintForm::default();
            form.begin_create();
            form.change(FormField::Title, &title);
            form.change(FormField::Description, &description);
            if let Some(amount) = &amount {
                form.change(FormField::AmountDisputed, amount);
            }
            form.change(FormField::TargetCompany, &target_company);
            form.change(FormField::TargetCompanyEmail, &target_company_email);

            let summary = submit(&mut form, &session, repository).await?;
            Ok(vec![format!("Created complaint {summary}")])
        }
        Command::Update {
            id,
            title,
            description,
            amount,
            target_company,
            target_company_email,
            status,
        } => {
            let session = signed_in(account)?;
            let role = session_role(&session)?;
            repository.load(&session).await?;

            let target_id = ComplaintId::new(id);
            let record = repository
                .find(&target_id)
                .ok_or_else(|| CommandError::UnknownRecord {
                    id: target_id.to_string(),
                })?;
            let user = session.user().ok_or(CommandError::NotSignedIn)?;
            if !authorization::can_edit(user, record) {
                return Err(CommandError::NotPermitted {
                    message: "You may not edit this complaint".to_owned(),
                });
            }

            let mut form = ComplaintForm::default();
            form.begin_edit(record);
            if let Some(title) = &title {
                form.change(FormField::Title, title);
            }
            if let Some(description) = &description {
                form.change(FormField::Description, description);
            }
            if let Some(amount) = &amount {
                form.change(FormField::AmountDisputed, amount);
            }
            if let Some(target_company) = &target_company {
                form.change(FormField::TargetCompany, target_company);
            }
            if let Some(target_company_email) = &target_company_email {
                form.change(FormField::TargetCompanyEmail, target_company_email);
            }
            if let Some(status) = status {
                form.set_status(role, status.into())?;
            }

            let summary = submit(&mut form, &session, repository).await?;
            Ok(vec![format!("Updated complaint {summary}")])
        }
        Command::Delete { id, yes } => {
            let session = signed_in(account)?;
            let confirmation = if yes {
                DeleteConfirmation::Confirmed
            } else {
                DeleteConfirmation::Dismissed
            };
            let outcome = repository
                .delete(&session, &ComplaintId::new(id), confirmation)
                .await?;
            Ok(vec![match outcome {
                DeleteOutcome::Deleted => "Deleted".to_owned(),
                DeleteOutcome::Cancelled => {
                    "Nothing deleted; pass --yes to confirm".to_owned()
                }
            }])
        }
    }
}

fn signed_in<A, S>(account: &AccountService<A, S>) -> Result<Session, CommandError>
where
    A: ComplaintsApi,
    S: SessionStorage,
{
    let session = account.restore();
    if session.is_authenticated() {
        Ok(session)
    } else {
        Err(CommandError::NotSignedIn)
    }
}

fn session_role(session: &Session) -> Result<Role, CommandError> {
    session
        .user()
        .map(|user| user.role)
        .ok_or(CommandError::NotSignedIn)
}

async fn submit<A: ComplaintsApi>(
    form: &mut ComplaintForm,
    session: &Session,
    repository: &mut ComplaintRepository<A>,
) -> Result<String, CommandError> {
    let intent = form.submit()?;
    let outcome = match intent {
        SubmitIntent::Create(payload) => repository.create(session, &payload).await,
        SubmitIntent::Update(id, payload) => repository.update(session, &id, &payload).await,
    };
    match outcome {
        Ok(record) => {
            form.resolve_success();
            Ok(format!("{} ({})", record.id, record.status))
        }
        Err(error) => {
            form.resolve_failure(error.message());
            Err(error.into())
        }
    }
}

fn greeting(session: &Session) -> Vec<String> {
    session.user().map_or_else(
        || vec!["Not signed in".to_owned()],
        |user| {
            vec![format!(
                "Signed in as {} <{}> ({})",
                user.name, user.email, user.role
            )]
        },
    )
}

fn render_listing<A>(session: &Session, repository: &ComplaintRepository<A>) -> Vec<String> {
    let Some(user) = session.user() else {
        return vec!["Not signed in".to_owned()];
    };
    if repository.complaints().is_empty() {
        return vec!["No complaints found.".to_owned()];
    }

    let mut lines = Vec::new();
    for record in repository.complaints() {
        let caps = authorization::capabilities(user, record);
        let mut actions = Vec::new();
        if caps.can_edit {
            actions.push("edit");
        }
        if caps.can_delete {
            actions.push("delete");
        }
        let actions = if actions.is_empty() {
            String::new()
        } else {
            format!("  [{}]", actions.join(", "))
        };

        lines.push(format!(
            "{}  [{}] {} vs {}{}",
            record.id, record.status, record.title, record.target_company, actions
        ));
        if caps.show_creator_identity
            && let Some(creator) = &record.created_by
        {
            lines.push(format!("        created by {}", creator.display_label()));
        }
    }
    lines
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
