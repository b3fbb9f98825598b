//! The self-contained encrypted envelope stored for each secret.
//!
//! Layout before base64 (standard alphabet, padded):
//!
//! ```text
//! [ salt: 16 bytes | nonce: 12 bytes | ciphertext + 16-byte GCM tag ]
//! ```
//!
//! Everything needed to decrypt except the passphrase travels inside the
//! envelope.  Salt and nonce are fresh for every call, so two envelopes
//! for the same plaintext and passphrase never match.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::Zeroizing;

use super::encryption::{self, NONCE_LEN};
use super::kdf::{self, SALT_LEN};
use crate::errors::{Result, VaultError};

/// Bytes that precede the ciphertext in a decoded envelope.
pub const ENVELOPE_HEADER_LEN: usize = SALT_LEN + NONCE_LEN;

/// Encrypt `plaintext` under `passphrase` and return the base64 envelope.
pub fn encrypt(plaintext: &str, passphrase: &str) -> Result<String> {
    let salt = kdf::generate_salt()?;
    let nonce = encryption::generate_nonce()?;

    let key = kdf::derive_key(passphrase.as_bytes(), &salt)?;
    let ciphertext = encryption::seal(key.as_ref(), &nonce, plaintext.as_bytes())?;

    let mut envelope = Vec::with_capacity(ENVELOPE_HEADER_LEN + ciphertext.len());
    envelope.extend_from_slice(&salt);
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(envelope))
}

/// Decrypt an envelope produced by [`encrypt`].
///
/// Structural problems (bad base64, too short) are `Format` errors and
/// are detected before any key derivation.  Everything after that fails
/// as the generic `Authentication` error.
pub fn decrypt(envelope: &str, passphrase: &str) -> Result<Zeroizing<String>> {
    let data = BASE64
        .decode(envelope)
        .map_err(|_| VaultError::Format("envelope is not valid base64".into()))?;

    if data.len() < ENVELOPE_HEADER_LEN {
        return Err(VaultError::Format(format!(
            "envelope is {} bytes, expected at least {ENVELOPE_HEADER_LEN}",
            data.len()
        )));
    }

    let (salt, rest) = data.split_at(SALT_LEN);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

    let key = kdf::derive_key(passphrase.as_bytes(), salt)?;
    let plaintext = encryption::open(key.as_ref(), nonce, ciphertext)?;

    // A verified tag over non-UTF-8 bytes means the envelope came from
    // somewhere other than `encrypt`.
    String::from_utf8(plaintext).map(Zeroizing::new).map_err(|e| {
        drop(Zeroizing::new(e.into_bytes()));
        VaultError::Format("decrypted value is not valid UTF-8".into())
    })
}
