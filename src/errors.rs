use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Crypto errors ---
    #[error("Invalid salt length: expected 16 bytes, got {0}")]
    InvalidSaltLength(usize),

    #[error("Decryption failed — wrong password or corrupted data")]
    AuthenticationFailure,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    // --- Envelope / vault errors ---
    #[error("Malformed vault file: {0}")]
    MalformedEnvelope(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0} (use --force to overwrite)")]
    VaultAlreadyExists(PathBuf),

    #[error("No entry at position {0}")]
    EntryNotFound(usize),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
