//! Vault module: entries, the file envelope, and the session around them.
//!
//! This module provides:
//! - `Entry`, `VaultMetadata`, and `PlainVault` (`entry`)
//! - The on-disk envelope and its encode/decode (`format`)
//! - `VaultSession` and its key-material lifecycle (`session`)
//! - A mutex-guarded session handle (`shared`)
//! - Atomic file read/write (`file`)

pub mod entry;
pub mod file;
pub mod format;
pub mod session;
pub mod shared;

// Re-export the most commonly used items.
pub use entry::{Entry, PlainVault, VaultMetadata};
pub use format::{decode, encode, Envelope};
pub use session::{SessionKeyMaterial, VaultSession};
pub use shared::SharedVaultSession;
