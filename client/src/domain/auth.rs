//! Authentication primitives such as login credentials and signup forms.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before any network call is made. Validation
//! failures here never reach the remote API.

use std::fmt;

use zeroize::Zeroizing;

use super::user::Role;

/// Minimum accepted password length for new registrations.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Domain error returned when login or signup values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
    /// Password and its confirmation differ.
    PasswordMismatch,
    /// Password is shorter than [`MIN_PASSWORD_LENGTH`].
    PasswordTooShort,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordMismatch => write!(f, "Passwords do not match"),
            Self::PasswordTooShort => write!(
                f,
                "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
            ),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated login credentials submitted to the remote API.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address used for the account lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated signup form submitted to the remote API.
///
/// Construction enforces the local validation rules the server never sees:
/// the confirmation must match and the password must meet the minimum
/// length. An invalid form cannot exist, so no network call can be issued
/// for one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    name: String,
    email: String,
    role: Role,
    password: Zeroizing<String>,
}

impl RegistrationForm {
    /// Construct a signup form from raw field inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        role: Role,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CredentialsValidationError::EmptyName);
        }
        let email = email.trim();
        if email.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        if password != confirm_password {
            return Err(CredentialsValidationError::PasswordMismatch);
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(CredentialsValidationError::PasswordTooShort);
        }
        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            role,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Display name for the new account.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Email address for the new account.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Requested account role.
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
