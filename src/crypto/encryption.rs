//! AES-256-GCM authenticated encryption.
//!
//! The nonce is supplied by the caller so the envelope layer can lay
//! out `salt || nonce || ciphertext` itself.  No associated data is used.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::errors::{Result, VaultError};

/// Size of the AES-256-GCM nonce in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// Generate a fresh random 12-byte nonce.
///
/// Nonces are never derived from a counter, so two envelopes can only
/// share one by a 96-bit random collision.
pub fn generate_nonce() -> Result<[u8; NONCE_LEN]> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| VaultError::Crypto(format!("OS randomness unavailable: {e}")))?;
    Ok(nonce)
}

/// Encrypt `plaintext` with a 32-byte `key` under `nonce`.
///
/// Returns the ciphertext with the 16-byte tag appended.
pub fn seal(key: &[u8], nonce: &[u8; NONCE_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| VaultError::Crypto(format!("invalid key length: {e}")))?;

    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|e| VaultError::Crypto(format!("encryption error: {e}")))
}

/// Decrypt and verify data produced by [`seal`].
///
/// Any tag mismatch is reported as the generic `Authentication` error;
/// the caller cannot tell a wrong key from tampered bytes.
pub fn open(key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if nonce.len() != NONCE_LEN {
        return Err(VaultError::Authentication);
    }

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| VaultError::Crypto(format!("invalid key length: {e}")))?;

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| VaultError::Authentication)
}
