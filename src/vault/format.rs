//! Vault envelope: the container written to disk.
//!
//! On disk an envelope is a JSON object with three string fields:
//!
//! ```text
//! {
//!   "iv":   "<base64 12-byte nonce, or empty>",
//!   "salt": "<base64 16-byte salt, or empty>",
//!   "data": "<base64 ciphertext+tag, or the raw vault JSON when iv/salt are empty>"
//! }
//! ```
//!
//! In memory the two modes are separate variants of `Envelope`, so the
//! "both empty means plaintext" rule only exists at the wire boundary.
//! A file with exactly one of `iv`/`salt` set, bad base64, or wrong
//! salt/nonce lengths is rejected as malformed before any key is
//! derived.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::entry::PlainVault;
use super::session::SessionKeyMaterial;
use crate::crypto::encryption::{open, seal, NONCE_LEN, TAG_LEN};
use crate::crypto::kdf::{derive_key, SALT_LEN};
use crate::errors::{PassVaultError, Result};

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// A parsed vault file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// No passphrase: `payload` is the vault JSON itself, unauthenticated.
    Plaintext { payload: String },

    /// Passphrase-protected: `ciphertext` is the AES-256-GCM output
    /// (ciphertext followed by the tag) of the vault JSON.
    Encrypted {
        salt: [u8; SALT_LEN],
        nonce: [u8; NONCE_LEN],
        ciphertext: Vec<u8>,
    },
}

/// The three-field JSON object as it appears on disk.
#[derive(Debug, Serialize, Deserialize)]
struct WireEnvelope {
    iv: String,
    salt: String,
    data: String,
}

impl Envelope {
    /// Returns `true` if a passphrase is needed to read this envelope.
    pub fn is_encrypted(&self) -> bool {
        matches!(self, Self::Encrypted { .. })
    }

    /// The salt, for encrypted envelopes.
    pub fn salt(&self) -> Option<&[u8; SALT_LEN]> {
        match self {
            Self::Encrypted { salt, .. } => Some(salt),
            Self::Plaintext { .. } => None,
        }
    }

    /// The nonce, for encrypted envelopes.
    pub fn nonce(&self) -> Option<&[u8; NONCE_LEN]> {
        match self {
            Self::Encrypted { nonce, .. } => Some(nonce),
            Self::Plaintext { .. } => None,
        }
    }

    /// Parse the on-disk JSON representation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let wire: WireEnvelope = serde_json::from_slice(bytes)
            .map_err(|e| PassVaultError::MalformedEnvelope(format!("envelope JSON: {e}")))?;

        match (wire.iv.is_empty(), wire.salt.is_empty()) {
            (true, true) => Ok(Self::Plaintext { payload: wire.data }),
            (false, false) => {
                let nonce = decode_fixed::<NONCE_LEN>("iv", &wire.iv)?;
                let salt = decode_fixed::<SALT_LEN>("salt", &wire.salt)?;
                let ciphertext = BASE64.decode(&wire.data).map_err(|e| {
                    PassVaultError::MalformedEnvelope(format!("data is not valid base64: {e}"))
                })?;
                if ciphertext.len() < TAG_LEN {
                    return Err(PassVaultError::MalformedEnvelope(format!(
                        "ciphertext is {} bytes, shorter than the {TAG_LEN}-byte tag",
                        ciphertext.len()
                    )));
                }
                Ok(Self::Encrypted {
                    salt,
                    nonce,
                    ciphertext,
                })
            }
            (true, false) => Err(PassVaultError::MalformedEnvelope(
                "salt is set but iv is empty".into(),
            )),
            (false, true) => Err(PassVaultError::MalformedEnvelope(
                "iv is set but salt is empty".into(),
            )),
        }
    }

    /// Serialize to the on-disk JSON representation (two-space indent).
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let wire = match self {
            Self::Plaintext { payload } => WireEnvelope {
                iv: String::new(),
                salt: String::new(),
                data: payload.clone(),
            },
            Self::Encrypted {
                salt,
                nonce,
                ciphertext,
            } => WireEnvelope {
                iv: BASE64.encode(nonce),
                salt: BASE64.encode(salt),
                data: BASE64.encode(ciphertext),
            },
        };

        serde_json::to_vec_pretty(&wire)
            .map_err(|e| PassVaultError::SerializationError(format!("envelope: {e}")))
    }
}

/// Decode a base64 field that must be exactly `N` bytes long.
fn decode_fixed<const N: usize>(field: &str, encoded: &str) -> Result<[u8; N]> {
    let bytes = BASE64.decode(encoded).map_err(|e| {
        PassVaultError::MalformedEnvelope(format!("{field} is not valid base64: {e}"))
    })?;

    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| {
        PassVaultError::MalformedEnvelope(format!(
            "{field} must be {N} bytes, got {}",
            bytes.len()
        ))
    })
}

// ---------------------------------------------------------------------------
// Encode / decode
// ---------------------------------------------------------------------------

/// Turn a vault into an envelope.
///
/// An empty `passphrase` produces a plaintext envelope and leaves
/// `key_material` alone.  Otherwise `key_material` supplies the salt
/// (kept across saves) and a nonce that has never been used in this
/// session, and records both.
pub fn encode(
    vault: &PlainVault,
    passphrase: &str,
    key_material: &mut SessionKeyMaterial,
) -> Result<Envelope> {
    let json = Zeroizing::new(
        serde_json::to_string(vault)
            .map_err(|e| PassVaultError::SerializationError(format!("vault: {e}")))?,
    );

    if passphrase.is_empty() {
        tracing::warn!(
            entries = vault.entries.len(),
            "encoding vault without a passphrase; contents are stored in plain text"
        );
        return Ok(Envelope::Plaintext {
            payload: json.as_str().to_owned(),
        });
    }

    let (salt, nonce) = key_material.next_seal_params();
    let key = derive_key(passphrase, &salt)?;
    let ciphertext = seal(&key, &nonce, json.as_bytes(), None)?;

    tracing::debug!(
        entries = vault.entries.len(),
        ciphertext_len = ciphertext.len(),
        "sealed vault"
    );

    Ok(Envelope::Encrypted {
        salt,
        nonce,
        ciphertext,
    })
}

/// Recover the vault from an envelope.
///
/// Plaintext envelopes are parsed as-is.  Encrypted envelopes are opened
/// with a key derived from `passphrase` and the envelope's own salt and
/// nonce.
pub fn decode(envelope: &Envelope, passphrase: &str) -> Result<PlainVault> {
    match envelope {
        Envelope::Plaintext { payload } => parse_vault(payload.as_bytes()),
        Envelope::Encrypted {
            salt,
            nonce,
            ciphertext,
        } => {
            let key = derive_key(passphrase, salt)?;
            let plaintext = Zeroizing::new(open(&key, nonce, ciphertext, None)?);
            tracing::debug!("opened vault ciphertext");
            parse_vault(&plaintext)
        }
    }
}

fn parse_vault(bytes: &[u8]) -> Result<PlainVault> {
    serde_json::from_slice(bytes)
        .map_err(|e| PassVaultError::SerializationError(format!("vault JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::entry::{Entry, VaultMetadata};

    fn sample_vault() -> PlainVault {
        PlainVault {
            metadata: VaultMetadata::default(),
            entries: vec![
                Entry::new("example.com", "alice", "s3cr3t", ""),
                Entry::new("mail.test", "bob", "pa55", "second"),
            ],
        }
    }

    fn wire(iv: &str, salt: &str, data: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({ "iv": iv, "salt": salt, "data": data })).unwrap()
    }

    #[test]
    fn encrypted_roundtrip() {
        let vault = sample_vault();
        let mut keys = SessionKeyMaterial::default();

        let envelope = encode(&vault, "hunter2", &mut keys).unwrap();
        assert!(envelope.is_encrypted());
        assert_eq!(keys.salt(), envelope.salt());
        assert_eq!(keys.nonce(), envelope.nonce());

        let bytes = envelope.to_bytes().unwrap();
        let parsed = Envelope::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, envelope);
        assert_eq!(decode(&parsed, "hunter2").unwrap(), vault);
    }

    #[test]
    fn plaintext_roundtrip_leaves_key_material_alone() {
        let vault = sample_vault();
        let mut keys = SessionKeyMaterial::default();

        let envelope = encode(&vault, "", &mut keys).unwrap();
        assert!(!envelope.is_encrypted());
        assert!(keys.is_empty());

        let bytes = envelope.to_bytes().unwrap();
        let parsed = Envelope::from_bytes(&bytes).unwrap();
        assert_eq!(decode(&parsed, "").unwrap(), vault);
    }

    #[test]
    fn plaintext_wire_data_is_raw_json() {
        let envelope = encode(&sample_vault(), "", &mut SessionKeyMaterial::default()).unwrap();
        let bytes = envelope.to_bytes().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["iv"], "");
        assert_eq!(value["salt"], "");
        let inner: serde_json::Value =
            serde_json::from_str(value["data"].as_str().unwrap()).unwrap();
        assert_eq!(inner["entries"][0]["website"], "example.com");
    }

    #[test]
    fn wire_format_has_exactly_three_fields() {
        let envelope = encode(&sample_vault(), "pw", &mut SessionKeyMaterial::default()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&envelope.to_bytes().unwrap()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 3);
        assert_eq!(BASE64.decode(object["iv"].as_str().unwrap()).unwrap().len(), NONCE_LEN);
        assert_eq!(BASE64.decode(object["salt"].as_str().unwrap()).unwrap().len(), SALT_LEN);
    }

    #[test]
    fn wire_format_is_indented() {
        let envelope = Envelope::Plaintext {
            payload: "{}".into(),
        };
        let text = String::from_utf8(envelope.to_bytes().unwrap()).unwrap();
        assert!(text.starts_with("{\n  \"iv\": \"\""));
    }

    #[test]
    fn wrong_passphrase_fails_closed() {
        let envelope = encode(&sample_vault(), "right", &mut SessionKeyMaterial::default()).unwrap();
        let err = decode(&envelope, "wrong").unwrap_err();
        assert!(matches!(err, PassVaultError::AuthenticationFailure));
    }

    #[test]
    fn flipped_nonce_bit_fails() {
        let envelope = encode(&sample_vault(), "pw", &mut SessionKeyMaterial::default()).unwrap();
        let Envelope::Encrypted {
            salt,
            mut nonce,
            ciphertext,
        } = envelope
        else {
            panic!("expected encrypted envelope");
        };
        nonce[0] ^= 0x01;

        let tampered = Envelope::Encrypted {
            salt,
            nonce,
            ciphertext,
        };
        assert!(matches!(
            decode(&tampered, "pw"),
            Err(PassVaultError::AuthenticationFailure)
        ));
    }

    #[test]
    fn flipped_ciphertext_bit_fails() {
        let envelope = encode(&sample_vault(), "pw", &mut SessionKeyMaterial::default()).unwrap();
        let Envelope::Encrypted {
            salt,
            nonce,
            mut ciphertext,
        } = envelope
        else {
            panic!("expected encrypted envelope");
        };
        let last = ciphertext.len() - 1;
        ciphertext[last] ^= 0x80;

        let tampered = Envelope::Encrypted {
            salt,
            nonce,
            ciphertext,
        };
        assert!(matches!(
            decode(&tampered, "pw"),
            Err(PassVaultError::AuthenticationFailure)
        ));
    }

    #[test]
    fn plaintext_with_garbage_payload_is_serialization_error() {
        let envelope = Envelope::Plaintext {
            payload: "not a vault".into(),
        };
        assert!(matches!(
            decode(&envelope, ""),
            Err(PassVaultError::SerializationError(_))
        ));
    }

    #[test]
    fn decrypted_non_vault_is_serialization_error() {
        let salt = [3u8; SALT_LEN];
        let nonce = [4u8; NONCE_LEN];
        let key = derive_key("pw", &salt).unwrap();
        let ciphertext = seal(&key, &nonce, b"[1, 2, 3]", None).unwrap();

        let envelope = Envelope::Encrypted {
            salt,
            nonce,
            ciphertext,
        };
        assert!(matches!(
            decode(&envelope, "pw"),
            Err(PassVaultError::SerializationError(_))
        ));
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            Envelope::from_bytes(b"definitely not json"),
            Err(PassVaultError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn rejects_missing_field() {
        let bytes = br#"{"iv":"","salt":""}"#;
        assert!(matches!(
            Envelope::from_bytes(bytes),
            Err(PassVaultError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn rejects_salt_without_iv() {
        let salt = BASE64.encode([0u8; SALT_LEN]);
        let err = Envelope::from_bytes(&wire("", &salt, "AAAA")).unwrap_err();
        assert!(matches!(err, PassVaultError::MalformedEnvelope(_)));
    }

    #[test]
    fn rejects_iv_without_salt() {
        let iv = BASE64.encode([0u8; NONCE_LEN]);
        let err = Envelope::from_bytes(&wire(&iv, "", "AAAA")).unwrap_err();
        assert!(matches!(err, PassVaultError::MalformedEnvelope(_)));
    }

    #[test]
    fn rejects_wrong_nonce_length() {
        let iv = BASE64.encode([0u8; 16]);
        let salt = BASE64.encode([0u8; SALT_LEN]);
        let data = BASE64.encode([0u8; 32]);
        let err = Envelope::from_bytes(&wire(&iv, &salt, &data)).unwrap_err();
        assert!(matches!(err, PassVaultError::MalformedEnvelope(_)));
    }

    #[test]
    fn rejects_wrong_salt_length() {
        let iv = BASE64.encode([0u8; NONCE_LEN]);
        let salt = BASE64.encode([0u8; 8]);
        let data = BASE64.encode([0u8; 32]);
        let err = Envelope::from_bytes(&wire(&iv, &salt, &data)).unwrap_err();
        assert!(matches!(err, PassVaultError::MalformedEnvelope(_)));
    }

    #[test]
    fn rejects_bad_base64() {
        let salt = BASE64.encode([0u8; SALT_LEN]);
        let data = BASE64.encode([0u8; 32]);
        let err = Envelope::from_bytes(&wire("!!not base64!!", &salt, &data)).unwrap_err();
        assert!(matches!(err, PassVaultError::MalformedEnvelope(_)));
    }

    #[test]
    fn rejects_ciphertext_shorter_than_tag() {
        let iv = BASE64.encode([0u8; NONCE_LEN]);
        let salt = BASE64.encode([0u8; SALT_LEN]);
        let data = BASE64.encode([0u8; 4]);
        let err = Envelope::from_bytes(&wire(&iv, &salt, &data)).unwrap_err();
        assert!(matches!(err, PassVaultError::MalformedEnvelope(_)));
    }

    #[test]
    fn ignores_unknown_fields() {
        let bytes = br#"{"iv":"","salt":"","data":"{\"entries\":[]}","comment":"x"}"#;
        let envelope = Envelope::from_bytes(bytes).unwrap();
        assert!(!envelope.is_encrypted());
        assert!(decode(&envelope, "").unwrap().entries.is_empty());
    }
}
