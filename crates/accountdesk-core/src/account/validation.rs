//! Account field validation.

use super::model::Account;

/// Maximum length of the raw label text, in characters.
pub const MAX_LABEL_LEN: usize = 50;

/// Maximum length of the login, in characters.
pub const MAX_LOGIN_LEN: usize = 100;

/// Maximum length of the password, in characters.
pub const MAX_PASSWORD_LEN: usize = 100;

/// Validation error for an account field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Raw label text is too long.
    LabelTooLong,
    /// Login is empty or whitespace.
    EmptyLogin,
    /// Login is too long.
    LoginTooLong,
    /// Local account has no password.
    EmptyPassword,
    /// Password is too long.
    PasswordTooLong,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::LabelTooLong => "Label must be at most 50 characters",
            Self::EmptyLogin => "Login is required",
            Self::LoginTooLong => "Login must be at most 100 characters",
            Self::EmptyPassword => "Password is required",
            Self::PasswordTooLong => "Password must be at most 100 characters",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::LabelTooLong => "rawLabel",
            Self::EmptyLogin | Self::LoginTooLong => "login",
            Self::EmptyPassword | Self::PasswordTooLong => "password",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result of validating an account.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Per-field outcome, in the shape of the flags stored on [`Account`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct FieldValidity {
    /// `raw_label` is acceptable.
    pub raw_label: bool,
    /// `login` is acceptable.
    pub login: bool,
    /// `password` is acceptable.
    pub password: bool,
}

impl FieldValidity {
    /// Whether every field is acceptable.
    #[must_use]
    pub const fn all(&self) -> bool {
        self.raw_label && self.login && self.password
    }
}

/// Validate an account.
///
/// Returns `Ok(())` if valid, or `Err(Vec<ValidationError>)` with all errors.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any fields are invalid.
pub fn validate_account(account: &Account) -> ValidationResult {
    let mut errors = Vec::new();

    // Labels are optional
    if account.raw_label.chars().count() > MAX_LABEL_LEN {
        errors.push(ValidationError::LabelTooLong);
    }

    if account.login.trim().is_empty() {
        errors.push(ValidationError::EmptyLogin);
    } else if account.login.chars().count() > MAX_LOGIN_LEN {
        errors.push(ValidationError::LoginTooLong);
    }

    if account.account_type.has_password() {
        if account.password.is_empty() {
            errors.push(ValidationError::EmptyPassword);
        } else if account.password.chars().count() > MAX_PASSWORD_LEN {
            errors.push(ValidationError::PasswordTooLong);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Collapse [`validate_account`] into per-field flags.
#[must_use]
pub fn field_validity(account: &Account) -> FieldValidity {
    let errors = validate_account(account).err().unwrap_or_default();
    let field_ok = |field: &str| !errors.iter().any(|e| e.field() == field);

    FieldValidity {
        raw_label: field_ok("rawLabel"),
        login: field_ok("login"),
        password: field_ok("password"),
    }
}
