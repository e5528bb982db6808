//! The derived vault key.
//!
//! A `VaultKey` is what PBKDF2 hands to AES-GCM.  Its bytes never leave
//! the crate: there is no public accessor, only the sealing and opening
//! functions in `encryption` can read it.

use std::fmt;

use zeroize::Zeroize;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A 32-byte AES-256 key that zeroes its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct VaultKey {
    bytes: [u8; KEY_LEN],
}

impl VaultKey {
    /// Wrap raw key bytes.  Only the KDF builds keys.
    pub(crate) fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Raw key bytes, for the AEAD layer only.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VaultKey([REDACTED])")
    }
}
