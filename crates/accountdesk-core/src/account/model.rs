//! Account model types.

use serde::{Deserialize, Deserializer, Serialize};

use super::label::Label;
use super::validation::field_validity;

/// Unique identifier for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl AccountId {
    /// Create a new account ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the account authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountType {
    /// Directory account; the password lives in LDAP, not here.
    #[serde(rename = "LDAP")]
    Ldap,
    /// Local account with its own password.
    #[default]
    #[serde(alias = "Локальная")]
    Local,
}

impl AccountType {
    /// Get display name for the account type.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Ldap => "LDAP",
            Self::Local => "Local",
        }
    }

    /// Whether accounts of this type carry a password.
    #[must_use]
    pub const fn has_password(&self) -> bool {
        matches!(self, Self::Local)
    }
}

/// A single account record as entered through the account form.
///
/// The validity flags are computed by [`Account::revalidate`] (or by the UI)
/// and stored alongside the data; the registry never recomputes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)] // Mirrors the form's per-field flags
pub struct Account {
    /// Registry-issued identifier.
    pub id: AccountId,
    /// Tags parsed from `raw_label`.
    #[serde(default)]
    pub label: Vec<Label>,
    /// Label text exactly as typed, `;` or `,` delimited.
    #[serde(default)]
    pub raw_label: String,
    /// Authentication kind.
    pub account_type: AccountType,
    /// Login name.
    #[serde(default)]
    pub login: String,
    /// Password; only meaningful for [`AccountType::Local`].
    #[serde(default, deserialize_with = "nullable_string")]
    pub password: String,
    /// Overall validity.
    #[serde(default)]
    pub is_valid: bool,
    /// Whether `login` passed validation.
    #[serde(default)]
    pub login_valid: bool,
    /// Whether `password` passed validation.
    #[serde(default)]
    pub password_valid: bool,
    /// Whether `raw_label` passed validation.
    #[serde(default)]
    pub raw_label_valid: bool,
}

impl Account {
    /// Create a blank local account with every validity flag unset.
    #[must_use]
    pub const fn new(id: AccountId) -> Self {
        Self {
            id,
            label: Vec::new(),
            raw_label: String::new(),
            account_type: AccountType::Local,
            login: String::new(),
            password: String::new(),
            is_valid: false,
            login_valid: false,
            password_valid: false,
            raw_label_valid: false,
        }
    }

    /// Replace the raw label text and regenerate the parsed tags.
    pub fn set_raw_label(&mut self, raw: impl Into<String>) {
        self.raw_label = raw.into();
        self.label = Label::parse_raw(&self.raw_label);
    }

    /// Switch the account type.
    ///
    /// Switching to LDAP clears the password.
    pub fn set_account_type(&mut self, account_type: AccountType) {
        self.account_type = account_type;
        if !account_type.has_password() {
            self.password.clear();
        }
    }

    /// Recompute and store every validity flag.
    pub fn revalidate(&mut self) {
        let validity = field_validity(self);
        self.login_valid = validity.login;
        self.password_valid = validity.password;
        self.raw_label_valid = validity.raw_label;
        self.is_valid = validity.all();
    }
}

/// Older stored data wrote `null` for LDAP passwords.
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
