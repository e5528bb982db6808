//! `VaultSession`: the live vault plus the salt/nonce it was last sealed with.
//!
//! A host (the CLI, or any other front end) owns one session per open
//! vault and drives it with four calls: `create_new`, `load`, `save`
//! and `add_entry`.  The host never sees the derived key.
//!
//! Key material lifecycle:
//!
//! ```text
//! Empty --save--> Populated(salt, n1) --save--> Populated(salt, n2)   n2 != n1
//!   ^                   |
//!   +---create_new------+
//! load(encrypted file) -> Populated(file salt, file nonce)
//! load(plaintext file) -> Empty
//! ```
//!
//! The salt is kept for the whole session; the nonce is replaced on
//! every save so no `(key, nonce)` pair ever seals two plaintexts.

use std::fmt;

use super::entry::{Entry, PlainVault, VaultMetadata};
use super::format::{self, Envelope};
use crate::crypto::encryption::{generate_nonce, NONCE_LEN};
use crate::crypto::kdf::{generate_salt, SALT_LEN};
use crate::errors::Result;

// ---------------------------------------------------------------------------
// SessionKeyMaterial
// ---------------------------------------------------------------------------

/// Salt and most recent nonce for the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionKeyMaterial {
    salt: Option<[u8; SALT_LEN]>,
    nonce: Option<[u8; NONCE_LEN]>,
}

impl SessionKeyMaterial {
    /// Salt that the next save will reuse, if any.
    pub fn salt(&self) -> Option<&[u8; SALT_LEN]> {
        self.salt.as_ref()
    }

    /// Nonce used by the last seal (or found in the loaded file).
    pub fn nonce(&self) -> Option<&[u8; NONCE_LEN]> {
        self.nonce.as_ref()
    }

    /// Returns `true` when neither salt nor nonce is set.
    pub fn is_empty(&self) -> bool {
        self.salt.is_none() && self.nonce.is_none()
    }

    /// Key material as found in a loaded envelope.
    pub(crate) fn from_envelope(envelope: &Envelope) -> Self {
        Self {
            salt: envelope.salt().copied(),
            nonce: envelope.nonce().copied(),
        }
    }

    /// Pick the salt and nonce for the next seal and remember them.
    ///
    /// The salt is generated once and then kept.  The nonce is always
    /// fresh and never equal to the one recorded before it.
    pub(crate) fn next_seal_params(&mut self) -> ([u8; SALT_LEN], [u8; NONCE_LEN]) {
        let salt = *self.salt.get_or_insert_with(generate_salt);

        let mut nonce = generate_nonce();
        while self.nonce == Some(nonce) {
            nonce = generate_nonce();
        }
        self.nonce = Some(nonce);

        (salt, nonce)
    }
}

// ---------------------------------------------------------------------------
// VaultSession
// ---------------------------------------------------------------------------

/// One open vault.
#[derive(Default)]
pub struct VaultSession {
    vault: PlainVault,
    key_material: SessionKeyMaterial,
}

impl VaultSession {
    /// A session holding an empty vault with default metadata.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Start a fresh, empty vault.
    ///
    /// Clears the key material, so the next encrypted save generates a
    /// new salt.  The passphrase is not stored; pass it to `save`.
    pub fn create_new(&mut self, metadata: VaultMetadata) {
        self.vault = PlainVault::with_metadata(metadata);
        self.key_material = SessionKeyMaterial::default();
        tracing::debug!("created new vault; key material cleared");
    }

    /// Replace the live vault with the contents of `bytes`.
    ///
    /// `passphrase` is ignored for plaintext files.  On any error the
    /// session keeps its previous vault and key material.
    pub fn load(&mut self, bytes: &[u8], passphrase: &str) -> Result<()> {
        let envelope = Envelope::from_bytes(bytes)?;
        let vault = format::decode(&envelope, passphrase)?;

        self.key_material = SessionKeyMaterial::from_envelope(&envelope);
        self.vault = vault;

        tracing::info!(
            entries = self.vault.entries.len(),
            encrypted = envelope.is_encrypted(),
            "loaded vault"
        );
        Ok(())
    }

    /// Serialize the live vault, encrypting it unless `passphrase` is empty.
    ///
    /// Returns the envelope bytes ready to be written to a file.
    pub fn save(&mut self, passphrase: &str) -> Result<Vec<u8>> {
        let envelope = format::encode(&self.vault, passphrase, &mut self.key_material)?;
        let bytes = envelope.to_bytes()?;

        tracing::info!(
            entries = self.vault.entries.len(),
            encrypted = envelope.is_encrypted(),
            "saved vault"
        );
        Ok(bytes)
    }

    /// Append an entry.  No field is validated here.
    pub fn add_entry(&mut self, entry: Entry) {
        self.vault.entries.push(entry);
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// All entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.vault.entries
    }

    /// The entry at zero-based `index`, if any.
    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.vault.entries.get(index)
    }

    pub fn metadata(&self) -> &VaultMetadata {
        &self.vault.metadata
    }

    pub fn vault(&self) -> &PlainVault {
        &self.vault
    }

    pub fn len(&self) -> usize {
        self.vault.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vault.entries.is_empty()
    }

    pub(crate) fn key_material(&self) -> &SessionKeyMaterial {
        &self.key_material
    }
}

impl fmt::Debug for VaultSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultSession")
            .field("metadata", &self.vault.metadata)
            .field("entries", &self.vault.entries.len())
            .field("key_material_set", &!self.key_material.is_empty())
            .finish()
    }
}
