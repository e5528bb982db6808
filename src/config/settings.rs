use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PassVaultError, Result};
use crate::vault::entry::{DEFAULT_ALGORITHM_LABEL, DEFAULT_SECURITY_LEVEL};
use crate::vault::VaultMetadata;

/// Project-level configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file used when `--file` is not given.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Algorithm label written into new vaults' metadata.
    #[serde(default = "default_algorithm")]
    pub default_algorithm: String,

    /// Security level label written into new vaults' metadata.
    #[serde(default = "default_security_level")]
    pub default_security_level: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    "passwords.json".to_string()
}

fn default_algorithm() -> String {
    DEFAULT_ALGORITHM_LABEL.to_string()
}

fn default_security_level() -> String {
    DEFAULT_SECURITY_LEVEL.to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            default_algorithm: default_algorithm(),
            default_security_level: default_security_level(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<project_dir>/.passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Resolve the vault file path: an explicit override wins, otherwise
    /// `vault_file` relative to `project_dir`.
    pub fn vault_path(&self, project_dir: &Path, override_path: Option<&str>) -> PathBuf {
        match override_path {
            Some(p) => project_dir.join(p),
            None => project_dir.join(&self.vault_file),
        }
    }

    /// Metadata for a new vault, with optional per-command overrides.
    pub fn metadata(&self, algorithm: Option<&str>, security_level: Option<&str>) -> VaultMetadata {
        VaultMetadata::new(
            algorithm.unwrap_or(&self.default_algorithm),
            security_level.unwrap_or(&self.default_security_level),
        )
    }
}

// ── Tests ────────────────────────────────────────────────────────────
