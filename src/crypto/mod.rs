//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - AES-256-GCM sealing and opening with explicit nonces (`encryption`)
//! - The non-extractable `VaultKey` handle shared by both (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive_key, seal, open, ...};
pub use encryption::{generate_nonce, open, seal, NONCE_LEN};
pub use kdf::{derive_key, generate_salt, PBKDF2_ITERATIONS, SALT_LEN};
pub use keys::{VaultKey, KEY_LEN};
