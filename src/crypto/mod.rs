//! Cryptographic primitives for deevault.
//!
//! This module provides:
//! - scrypt passphrase-based key derivation (`kdf`)
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - The base64 salt/nonce/ciphertext envelope (`envelope`)

pub mod encryption;
pub mod envelope;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt};
pub use envelope::{decrypt, encrypt, ENVELOPE_HEADER_LEN};
pub use kdf::{derive_key, generate_salt};
