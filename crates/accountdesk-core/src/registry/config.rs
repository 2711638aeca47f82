//! Registry configuration.

use serde::{Deserialize, Serialize};

/// Default key the registry is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "accounts";

/// Registry settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Key the registry blob is stored under.
    pub storage_key: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl RegistryConfig {
    /// Use a different storage key.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}
