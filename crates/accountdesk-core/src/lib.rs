//! # accountdesk-core
//!
//! Account registry for form-driven account entry.
//!
//! This crate provides:
//! - Account records with per-field validity flags
//! - Label parsing from delimited input
//! - An id-issuing registry with tolerant update/remove
//! - Persistence through a pluggable key-value store (in-memory or file)
//! - Change notification for UI layers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
mod error;
pub mod registry;
pub mod storage;

pub use account::{
    Account, AccountId, AccountType, FieldValidity, Label, ValidationError, ValidationResult,
    field_validity, validate_account,
};
pub use error::{Error, Result};
pub use registry::{AccountRegistry, RegistryConfig, RegistryEvent, SubscriptionId};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
