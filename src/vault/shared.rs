//! Thread-safe handle to a single `VaultSession`.
//!
//! Each call holds the lock for its whole duration, so two `save`/`load`
//! calls on the same session never overlap.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::entry::{Entry, VaultMetadata};
use super::session::VaultSession;
use crate::errors::Result;

/// A cloneable, mutex-guarded `VaultSession`.
#[derive(Debug, Clone, Default)]
pub struct SharedVaultSession {
    inner: Arc<Mutex<VaultSession>>,
}

impl SharedVaultSession {
    pub fn new(session: VaultSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn create_new(&self, metadata: VaultMetadata) {
        self.lock().create_new(metadata);
    }

    pub fn load(&self, bytes: &[u8], passphrase: &str) -> Result<()> {
        self.lock().load(bytes, passphrase)
    }

    pub fn save(&self, passphrase: &str) -> Result<Vec<u8>> {
        self.lock().save(passphrase)
    }

    pub fn add_entry(&self, entry: Entry) {
        self.lock().add_entry(entry);
    }

    /// A snapshot of the current entries.
    pub fn entries(&self) -> Vec<Entry> {
        self.lock().entries().to_vec()
    }

    /// Run `f` against the session while holding the lock.
    pub fn with_session<R>(&self, f: impl FnOnce(&VaultSession) -> R) -> R {
        f(&self.lock())
    }

    // Session methods either finish or leave the state as it was, so a
    // poisoned lock still guards a consistent session.
    fn lock(&self) -> MutexGuard<'_, VaultSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
