//! Persisted registry layout.
//!
//! The blob is `{ "accounts": [...], "nextId": n }`. Decoding substitutes
//! defaults only for absent or `null` fields (and for `nextId: 0`); fields of
//! the wrong type are an error.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::account::Account;
use crate::{Error, Result};

/// Counter value for an empty registry.
pub const INITIAL_NEXT_ID: u64 = 1;

/// Highest counter a registry may hold; it keeps `next_id + 1` representable.
pub const MAX_NEXT_ID: u64 = u64::MAX - 1;

/// Decoded registry state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Accounts in display order.
    pub accounts: Vec<Account>,
    /// Next id to issue.
    pub next_id: u64,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            accounts: Vec::new(),
            next_id: INITIAL_NEXT_ID,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredRef<'a> {
    accounts: &'a [Account],
    next_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Stored {
    #[serde(default)]
    accounts: Option<Vec<Account>>,
    #[serde(default)]
    next_id: Option<u64>,
}

/// Serialize registry state into a blob.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(accounts: &[Account], next_id: u64) -> Result<String> {
    Ok(serde_json::to_string(&StoredRef { accounts, next_id })?)
}

/// Parse a blob back into registry state.
///
/// A counter that does not exceed every stored id is raised to
/// `max_id + 1`.
///
/// # Errors
///
/// Returns [`Error::Serde`] for malformed or mistyped data,
/// [`Error::DuplicateAccountId`] if an id appears twice, and
/// [`Error::IdSpaceExhausted`] if the counter could not issue another id.
pub fn decode(blob: &str) -> Result<Snapshot> {
    let stored: Stored = serde_json::from_str(blob)?;
    let accounts = stored.accounts.unwrap_or_default();

    let mut seen = HashSet::with_capacity(accounts.len());
    for account in &accounts {
        if !seen.insert(account.id) {
            return Err(Error::DuplicateAccountId(account.id));
        }
    }

    let mut next_id = match stored.next_id {
        None | Some(0) => INITIAL_NEXT_ID,
        Some(n) => n,
    };

    if let Some(max_id) = accounts.iter().map(|a| a.id.0).max()
        && next_id <= max_id
    {
        warn!(
            "Stored nextId {} does not exceed highest id {}, repairing",
            next_id, max_id
        );
        next_id = max_id
            .checked_add(1)
            .ok_or(Error::IdSpaceExhausted(max_id))?;
    }

    if next_id > MAX_NEXT_ID {
        return Err(Error::IdSpaceExhausted(next_id));
    }

    Ok(Snapshot { accounts, next_id })
}
