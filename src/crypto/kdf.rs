//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The iteration count and output length are fixed so that every vault
//! file, old or new, opens with the same parameters.  Nothing about the
//! KDF is stored in the file besides the salt.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroize;

use super::keys::{VaultKey, KEY_LEN};
use crate::errors::{PassVaultError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Number of PBKDF2 rounds.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derive the AES-256 vault key from a passphrase and a 16-byte salt.
///
/// An empty passphrase is accepted and yields a (weak) key; deciding
/// whether to encrypt at all happens in the envelope layer.
pub fn derive_key(passphrase: &str, salt: &[u8]) -> Result<VaultKey> {
    if salt.len() != SALT_LEN {
        return Err(PassVaultError::InvalidSaltLength(salt.len()));
    }

    let mut okm = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, PBKDF2_ITERATIONS, &mut okm);

    let key = VaultKey::new(okm);
    okm.zeroize();
    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}
