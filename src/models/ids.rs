//! Deterministic competitor identifiers.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Stable competitor identifier.
///
/// Records supplied by the data feed carry their own id. Imported rows without
/// one get an id derived from their content hash so that re-importing the same
/// roster yields the same ids.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetitorId(String);

impl CompetitorId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an id from `|`-joined fields.
    /// Uses SHA256 and keeps the first 16 hex characters.
    pub fn generate(fields: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update(field.as_bytes());
        }
        let hash = hex::encode(hasher.finalize());
        Self(hash[..16].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CompetitorId {
    fn default() -> Self {
        Self(String::new())
    }
}

impl fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompetitorId({})", self.0)
    }
}

impl From<String> for CompetitorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CompetitorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
