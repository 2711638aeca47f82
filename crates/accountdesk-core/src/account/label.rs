//! Label tags.

use serde::{Deserialize, Serialize};

/// A single tag parsed from an account's raw label text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    /// Display text.
    pub text: String,
}

impl Label {
    /// Create a label with the given text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Parse `;` or `,` delimited input into tags.
    ///
    /// Pieces are trimmed and empty pieces dropped; order is kept.
    #[must_use]
    pub fn parse_raw(raw: &str) -> Vec<Self> {
        raw.split([';', ','])
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(Self::new)
            .collect()
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
