use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in deevault.
///
/// A declined confirmation is not an error; see [`crate::vault::Outcome`].
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Envelope errors ---
    #[error("Malformed envelope: {0}")]
    Format(String),

    #[error("Decryption failed — wrong passphrase or corrupted data")]
    Authentication,

    #[error("Cryptographic failure: {0}")]
    Crypto(String),

    // --- Vault errors ---
    #[error("Secret '{0}' not found")]
    NotFound(String),

    #[error("Vault file {} is corrupt: {reason} (refusing to touch it)", path.display())]
    StoreCorrupt { path: PathBuf, reason: String },

    #[error("Invalid secret name: {0}")]
    InvalidName(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Passphrase mismatch — passphrases do not match")]
    PassphraseMismatch,

    #[error("Passphrase must be at least {0} characters")]
    WeakPassphrase(usize),
}

/// Convenience type alias for deevault results.
pub type Result<T> = std::result::Result<T, VaultError>;
