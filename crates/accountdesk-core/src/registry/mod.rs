//! Account registry.
//!
//! Owns the ordered account list and the id counter. Ids are issued from a
//! counter that only moves forward, so an id is never reused even after its
//! account is removed.

mod config;
mod events;

use tracing::{debug, info};

use crate::{Error, Result};
use crate::account::{Account, AccountId};
use crate::storage::KeyValueStore;
use crate::storage::snapshot::{self, INITIAL_NEXT_ID, MAX_NEXT_ID};

pub use config::{DEFAULT_STORAGE_KEY, RegistryConfig};
pub use events::{RegistryEvent, SubscriptionId};

use events::Listeners;

/// In-memory account list bound to a durable store.
pub struct AccountRegistry<S> {
    store: S,
    config: RegistryConfig,
    accounts: Vec<Account>,
    next_id: u64,
    listeners: Listeners,
}

impl<S: KeyValueStore> AccountRegistry<S> {
    /// Create an empty registry using the default configuration.
    ///
    /// Nothing is read from `store` until [`load_from_storage`](Self::load_from_storage).
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_config(store, RegistryConfig::default())
    }

    /// Create an empty registry with explicit configuration.
    #[must_use]
    pub fn with_config(store: S, config: RegistryConfig) -> Self {
        Self {
            store,
            config,
            accounts: Vec::new(),
            next_id: INITIAL_NEXT_ID,
            listeners: Listeners::default(),
        }
    }

    /// Accounts in display order.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Id the next [`add_account`](Self::add_account) will issue.
    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Look up an account by id.
    #[must_use]
    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the registry holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the registry and return its store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Append a blank local account and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdSpaceExhausted`] once the counter would pass
    /// [`MAX_NEXT_ID`]; nothing is appended in that case.
    pub fn add_account(&mut self) -> Result<AccountId> {
        let id = AccountId::new(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .filter(|next| *next <= MAX_NEXT_ID)
            .ok_or(Error::IdSpaceExhausted(self.next_id))?;
        self.accounts.push(Account::new(id));
        debug!("Added account {id}, next id {}", self.next_id);
        self.listeners.emit(&RegistryEvent::Added(id));
        Ok(id)
    }

    /// Replace the account whose id matches `updated.id`.
    ///
    /// The whole record is overwritten, not merged. Unknown ids are ignored;
    /// the return value says whether anything was replaced.
    pub fn update_account(&mut self, updated: Account) -> bool {
        let id = updated.id;
        let Some(slot) = self.accounts.iter_mut().find(|a| a.id == id) else {
            debug!("Ignoring update for unknown account {id}");
            return false;
        };
        *slot = updated;
        debug!("Replaced account {id}");
        self.listeners.emit(&RegistryEvent::Updated(id));
        true
    }

    /// Mutate an account in place.
    ///
    /// The id is restored after `f` runs, so the account keeps its
    /// identity. Returns `false` if no account has `id`.
    pub fn edit<F>(&mut self, id: AccountId, f: F) -> bool
    where
        F: FnOnce(&mut Account),
    {
        let Some(account) = self.accounts.iter_mut().find(|a| a.id == id) else {
            debug!("Ignoring edit for unknown account {id}");
            return false;
        };
        f(&mut *account);
        account.id = id;
        self.listeners.emit(&RegistryEvent::Updated(id));
        true
    }

    /// Remove the account with `id`, keeping the order of the rest.
    ///
    /// Unknown ids are ignored. The id counter is not touched.
    pub fn remove_account(&mut self, id: AccountId) -> bool {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.id != id);
        let removed = self.accounts.len() != before;
        if removed {
            debug!("Removed account {id}");
            self.listeners.emit(&RegistryEvent::Removed(id));
        }
        removed
    }

    /// Replace in-memory state with what the store holds.
    ///
    /// Returns `false` and leaves state untouched when nothing is stored or
    /// the stored blob is blank.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the stored blob does
    /// not decode; state is left untouched in that case too.
    pub fn load_from_storage(&mut self) -> Result<bool> {
        let Some(blob) = self.store.get(&self.config.storage_key)? else {
            debug!(
                "Nothing stored under {:?}, keeping current state",
                self.config.storage_key
            );
            return Ok(false);
        };
        if blob.trim().is_empty() {
            debug!(
                "Blank value under {:?}, keeping current state",
                self.config.storage_key
            );
            return Ok(false);
        }

        let snapshot = snapshot::decode(&blob)?;
        self.accounts = snapshot.accounts;
        self.next_id = snapshot.next_id;

        let count = self.accounts.len();
        info!("Loaded {count} accounts, next id {}", self.next_id);
        self.listeners.emit(&RegistryEvent::Loaded { count });
        Ok(true)
    }

    /// Write the account list and counter to the store, replacing any
    /// previous blob.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the store rejects the write.
    pub fn save_to_storage(&self) -> Result<()> {
        let blob = snapshot::encode(&self.accounts, self.next_id)?;
        self.store.set(&self.config.storage_key, &blob)?;
        info!(
            "Saved {} accounts under {:?}",
            self.accounts.len(),
            self.config.storage_key
        );
        Ok(())
    }

    /// Register a listener called after every applied change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&RegistryEvent) + 'static,
    {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for AccountRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountRegistry")
            .field("store", &self.store)
            .field("config", &self.config)
            .field("accounts", &self.accounts)
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
