//! Entry, VaultMetadata, and PlainVault: the logical vault content.
//!
//! Serde renames keep the JSON keys (`website`, `password`,
//! `algorithm`, `securityLevel`) that existing vault files use.

use serde::{Deserialize, Serialize};

/// Default value for `VaultMetadata::algorithm_label`.
pub const DEFAULT_ALGORITHM_LABEL: &str = "AES-GCM";

/// Default value for `VaultMetadata::security_level`.
pub const DEFAULT_SECURITY_LEVEL: &str = "256-bit";

/// A single credential record.  Identified only by its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "website")]
    pub site: String,
    pub username: String,
    #[serde(rename = "password")]
    pub secret: String,
    pub note: String,
}

impl Entry {
    pub fn new(
        site: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            username: username.into(),
            secret: secret.into(),
            note: note.into(),
        }
    }
}

/// Descriptive tags stored next to the entries.
///
/// These are labels only.  The cipher is always AES-256-GCM no matter
/// what they say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultMetadata {
    #[serde(rename = "algorithm")]
    pub algorithm_label: String,
    #[serde(rename = "securityLevel")]
    pub security_level: String,
}

impl VaultMetadata {
    pub fn new(algorithm_label: impl Into<String>, security_level: impl Into<String>) -> Self {
        Self {
            algorithm_label: algorithm_label.into(),
            security_level: security_level.into(),
        }
    }
}

impl Default for VaultMetadata {
    fn default() -> Self {
        Self::new(DEFAULT_ALGORITHM_LABEL, DEFAULT_SECURITY_LEVEL)
    }
}

/// Everything that gets serialized (and, with a passphrase, encrypted).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainVault {
    /// Files written without metadata get the defaults.
    #[serde(default)]
    pub metadata: VaultMetadata,
    pub entries: Vec<Entry>,
}

impl PlainVault {
    /// An empty vault with the given metadata.
    pub fn with_metadata(metadata: VaultMetadata) -> Self {
        Self {
            metadata,
            entries: Vec::new(),
        }
    }
}
