//! AES-256-GCM authenticated encryption with caller-supplied nonces.
//!
//! Unlike a "nonce-prepended" blob, the vault file stores the nonce in
//! its own field, so `seal` and `open` take the nonce explicitly.  The
//! output of `seal` is the ciphertext followed by the 16-byte auth tag.
//!
//! `seal` is deterministic: the same key, nonce, and plaintext always
//! give the same bytes.  Callers must never seal two different
//! plaintexts under the same key and nonce.

use aes_gcm::aead::{Aead, KeyInit, OsRng, Payload};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use super::keys::VaultKey;
use crate::errors::{PassVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt and authenticate `plaintext` under `key` and `nonce`.
///
/// `aad` is authenticated but not encrypted; pass the same value to
/// `open`.
pub fn seal(
    key: &VaultKey,
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
    aad: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| PassVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let payload = Payload {
        msg: plaintext,
        aad: aad.unwrap_or_default(),
    };

    cipher
        .encrypt(Nonce::from_slice(nonce), payload)
        .map_err(|e| PassVaultError::EncryptionFailed(format!("encryption error: {e}")))
}

/// Verify and decrypt bytes produced by `seal`.
///
/// Every failure (wrong key, wrong nonce, wrong `aad`, flipped or
/// truncated bytes) is reported as the same `AuthenticationFailure`.
pub fn open(
    key: &VaultKey,
    nonce: &[u8; NONCE_LEN],
    ciphertext_with_tag: &[u8],
    aad: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| PassVaultError::AuthenticationFailure)?;

    let payload = Payload {
        msg: ciphertext_with_tag,
        aad: aad.unwrap_or_default(),
    };

    cipher
        .decrypt(Nonce::from_slice(nonce), payload)
        .map_err(|_| PassVaultError::AuthenticationFailure)
}

/// Generate a random 12-byte nonce from the OS CSPRNG.
pub fn generate_nonce() -> [u8; NONCE_LEN] {
    let generated = Aes256Gcm::generate_nonce(&mut OsRng);
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&generated);
    nonce
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KEY_LEN;

    fn test_key(byte: u8) -> VaultKey {
        VaultKey::new([byte; KEY_LEN])
    }

    #[test]
    fn seal_open_roundtrip() {
        let key = test_key(0xAB);
        let nonce = generate_nonce();
        let plaintext = b"{\"entries\":[]}";

        let sealed = seal(&key, &nonce, plaintext, None).expect("seal");
        assert_eq!(sealed.len(), plaintext.len() + TAG_LEN);

        let opened = open(&key, &nonce, &sealed, None).expect("open");
        assert_eq!(opened, plaintext);
    }

    #[test]
    fn seal_matches_reference_aes_gcm_output() {
        let key = test_key(0x11);
        let nonce = [0x22u8; NONCE_LEN];

        let sealed = seal(&key, &nonce, b"hello vault", None).unwrap();
        let expected = [
            0x7f, 0x92, 0x6b, 0x25, 0xaf, 0xef, 0xe9, 0x3e, 0x90, 0x53, 0xaa, 0xbd, 0x67, 0x1f,
            0xa3, 0x0e, 0x32, 0x80, 0x48, 0x86, 0x39, 0x83, 0x70, 0x1b, 0xec, 0x7d, 0xf4,
        ];
        assert_eq!(sealed, expected);
    }

    #[test]
    fn seal_with_aad_matches_reference_output() {
        let key = test_key(0x11);
        let nonce = [0x22u8; NONCE_LEN];

        let sealed = seal(&key, &nonce, b"hello vault", Some(b"header")).unwrap();
        let expected = [
            0x7f, 0x92, 0x6b, 0x25, 0xaf, 0xef, 0xe9, 0x3e, 0x90, 0x53, 0xaa, 0xb7, 0x03, 0xad,
            0x70, 0xcc, 0x6c, 0x7f, 0xa4, 0x33, 0x5b, 0x37, 0xee, 0x3f, 0x96, 0xa8, 0x7d,
        ];
        assert_eq!(sealed, expected);
    }

    #[test]
    fn seal_is_deterministic() {
        let key = test_key(0x33);
        let nonce = [7u8; NONCE_LEN];
        let a = seal(&key, &nonce, b"same", None).unwrap();
        let b = seal(&key, &nonce, b"same", None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn open_with_wrong_key_fails() {
        let nonce = generate_nonce();
        let sealed = seal(&test_key(1), &nonce, b"secret", None).unwrap();
        let err = open(&test_key(2), &nonce, &sealed, None).unwrap_err();
        assert!(matches!(err, PassVaultError::AuthenticationFailure));
    }

    #[test]
    fn open_with_wrong_nonce_fails() {
        let key = test_key(1);
        let sealed = seal(&key, &[1u8; NONCE_LEN], b"secret", None).unwrap();
        let err = open(&key, &[2u8; NONCE_LEN], &sealed, None).unwrap_err();
        assert!(matches!(err, PassVaultError::AuthenticationFailure));
    }

    #[test]
    fn open_with_mismatched_aad_fails() {
        let key = test_key(1);
        let nonce = generate_nonce();
        let sealed = seal(&key, &nonce, b"secret", Some(b"a")).unwrap();
        assert!(open(&key, &nonce, &sealed, Some(b"b")).is_err());
        assert!(open(&key, &nonce, &sealed, None).is_err());
        assert!(open(&key, &nonce, &sealed, Some(b"a")).is_ok());
    }

    #[test]
    fn every_flipped_bit_is_detected() {
        let key = test_key(5);
        let nonce = generate_nonce();
        let sealed = seal(&key, &nonce, b"abc", None).unwrap();

        for byte in 0..sealed.len() {
            for bit in 0..8 {
                let mut tampered = sealed.clone();
                tampered[byte] ^= 1 << bit;
                let err = open(&key, &nonce, &tampered, None).unwrap_err();
                assert!(matches!(err, PassVaultError::AuthenticationFailure));
            }
        }
    }

    #[test]
    fn truncated_input_fails() {
        let key = test_key(5);
        let nonce = generate_nonce();
        let err = open(&key, &nonce, &[0u8; 5], None).unwrap_err();
        assert!(matches!(err, PassVaultError::AuthenticationFailure));
    }

    #[test]
    fn generated_nonces_differ() {
        assert_ne!(generate_nonce(), generate_nonce());
    }
}
