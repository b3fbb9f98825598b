//! Passphrase-based key derivation using scrypt.
//!
//! scrypt is memory-hard, so brute-forcing a weak passphrase offline
//! costs ~32 MB and a noticeable slice of CPU per guess.  The work
//! factors are fixed: they are not recorded in the envelope, so every
//! envelope ever written must be opened with exactly these values.

use rand::rngs::OsRng;
use rand::TryRngCore;
use scrypt::Params;
use zeroize::Zeroizing;

use crate::errors::{Result, VaultError};

/// Length of the per-envelope salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// log2 of the scrypt cost parameter N (N = 32 768).
pub const SCRYPT_LOG_N: u8 = 15;

/// scrypt block size.
pub const SCRYPT_R: u32 = 8;

/// scrypt parallelism.
pub const SCRYPT_P: u32 = 1;

/// Derive a 32-byte key from a passphrase and salt.
///
/// The same passphrase + salt always produce the same key.  The key is
/// returned in a `Zeroizing` buffer so it is wiped once dropped.
pub fn derive_key(passphrase: &[u8], salt: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LEN)
        .map_err(|e| VaultError::Crypto(format!("invalid scrypt parameters: {e}")))?;

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    scrypt::scrypt(passphrase, salt, &params, key.as_mut())
        .map_err(|e| VaultError::Crypto(format!("scrypt failed: {e}")))?;

    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| VaultError::Crypto(format!("OS randomness unavailable: {e}")))?;
    Ok(salt)
}
