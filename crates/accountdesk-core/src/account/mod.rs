//! Account records.
//!
//! Provides the account model, label parsing, and field validation.

mod label;
mod model;
mod validation;

pub use label::Label;
pub use model::{Account, AccountId, AccountType};
pub use validation::{
    FieldValidity, MAX_LABEL_LEN, MAX_LOGIN_LEN, MAX_PASSWORD_LEN, ValidationError,
    ValidationResult, field_validity, validate_account,
};
