//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` owns nothing but a path and a filesystem handle.  Every
//! operation loads the file fresh, works on the in-memory mapping, and
//! (for mutations) writes the whole mapping back via `VaultFs::replace`.
//! There is no long-lived vault state between calls.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::crypto::encryption::TAG_LEN;
use crate::crypto::envelope::{self, ENVELOPE_HEADER_LEN};
use crate::errors::{Result, VaultError};

use super::format::{self, SecretMap};
use super::fs::{OsFs, VaultFs};
use super::prompt::Prompter;

/// Maximum length of a secret name in bytes.
const MAX_NAME_LEN: usize = 256;

/// Result of an operation gated on a confirmation.
///
/// `Aborted` means the user said no.  It is a normal outcome, not an
/// error, and guarantees nothing was written.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Done(T),
    Aborted,
}

impl<T> Outcome<T> {
    pub fn is_aborted(&self) -> bool {
        matches!(self, Outcome::Aborted)
    }

    /// The completed value, or `None` if the user declined.
    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(v) => Some(v),
            Outcome::Aborted => None,
        }
    }
}

/// Handle to a vault file.  Cheap to build; holds no secrets.
pub struct VaultStore<F: VaultFs = OsFs> {
    /// Path to the JSON vault file.
    path: PathBuf,

    /// Filesystem used for every read and write.
    fs: F,
}

impl VaultStore<OsFs> {
    /// A store backed by the real filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(path, OsFs)
    }
}

impl<F: VaultFs> VaultStore<F> {
    /// A store backed by an arbitrary `VaultFs` (e.g. `MemoryFs`).
    pub fn with_fs(path: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------

    /// Read and decode the vault file.
    ///
    /// A missing file is an empty vault.  A file that does not decode is
    /// `StoreCorrupt` and is left exactly as found.
    pub fn load(&self) -> Result<SecretMap> {
        let secrets = match self.fs.read(&self.path)? {
            Some(bytes) => format::decode(&self.path, &bytes)?,
            None => SecretMap::new(),
        };
        debug!(path = %self.path.display(), entries = secrets.len(), "loaded vault");
        Ok(secrets)
    }

    /// Sorted list of stored secret names.  Nothing is decrypted.
    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self.load()?.into_keys().collect())
    }

    /// Returns `true` if a secret with this name is stored.
    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.load()?.contains_key(name))
    }

    // ------------------------------------------------------------------
    // Secret operations
    // ------------------------------------------------------------------

    /// Encrypt `plaintext` under `passphrase` and store it as `name`.
    ///
    /// Overwriting an existing name needs a "yes" from `prompter`.  The
    /// envelope is built before anything is written, so a failure at any
    /// step leaves the file as it was.
    pub fn put<P: Prompter + ?Sized>(
        &self,
        name: &str,
        plaintext: &str,
        passphrase: &str,
        prompter: &mut P,
    ) -> Result<Outcome<()>> {
        validate_secret_name(name)?;
        let mut secrets = self.load()?;

        if secrets.contains_key(name)
            && !prompter.confirm(&format!("Secret '{name}' already exists. Overwrite?"))?
        {
            debug!(secret = %name, "overwrite declined");
            return Ok(Outcome::Aborted);
        }

        let sealed = envelope::encrypt(plaintext, passphrase)?;
        let replaced = secrets.insert(name.to_string(), sealed).is_some();
        self.persist(&secrets)?;

        info!(secret = %name, replaced, total = secrets.len(), "stored secret");
        Ok(Outcome::Done(()))
    }

    /// Decrypt `name` for display.
    ///
    /// The decrypted value is only handed back after `prompter` confirms
    /// that it should be shown.
    pub fn get<P: Prompter + ?Sized>(
        &self,
        name: &str,
        passphrase: &str,
        prompter: &mut P,
    ) -> Result<Outcome<Zeroizing<String>>> {
        let plaintext = self.unlock(name, passphrase)?;

        if !prompter.confirm(&format!("Display the decrypted value of '{name}'?"))? {
            debug!(secret = %name, "display declined");
            return Ok(Outcome::Aborted);
        }

        Ok(Outcome::Done(plaintext))
    }

    /// Decrypt `name` without the display confirmation.
    ///
    /// For callers that pass the secret straight to another program
    /// (e.g. as an API token) instead of showing it.
    pub fn unlock(&self, name: &str, passphrase: &str) -> Result<Zeroizing<String>> {
        let secrets = self.load()?;
        decrypt_entry(&secrets, name, passphrase)
    }

    /// Remove `name` after confirmation and passphrase proof.
    ///
    /// The passphrase must decrypt the stored envelope; otherwise the
    /// entry stays and `Authentication` is returned.
    pub fn delete<P: Prompter + ?Sized>(
        &self,
        name: &str,
        passphrase: &str,
        prompter: &mut P,
    ) -> Result<Outcome<()>> {
        let mut secrets = self.load()?;

        let sealed = secrets
            .get(name)
            .ok_or_else(|| VaultError::NotFound(name.to_string()))?;

        if !prompter.confirm(&format!("Delete secret '{name}'?"))? {
            debug!(secret = %name, "delete declined");
            return Ok(Outcome::Aborted);
        }

        match envelope::decrypt(sealed, passphrase) {
            Ok(_) => {}
            Err(e @ VaultError::Crypto(_)) => return Err(e),
            Err(_) => {
                warn!(secret = %name, "delete refused: passphrase did not verify");
                return Err(VaultError::Authentication);
            }
        }

        secrets.remove(name);
        self.persist(&secrets)?;

        info!(secret = %name, total = secrets.len(), "deleted secret");
        Ok(Outcome::Done(()))
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Encode the full mapping and replace the vault file with it.
    fn persist(&self, secrets: &SecretMap) -> Result<()> {
        let bytes = format::encode(secrets)?;
        self.fs.replace(&self.path, &bytes)?;
        debug!(path = %self.path.display(), entries = secrets.len(), "persisted vault");
        Ok(())
    }
}

/// Decrypt one entry, running the same KDF + AEAD work when it is absent.
///
/// A missing name decrypts a fixed decoy envelope before reporting
/// `NotFound`, so the time taken does not reveal which names exist.
fn decrypt_entry(secrets: &SecretMap, name: &str, passphrase: &str) -> Result<Zeroizing<String>> {
    match secrets.get(name) {
        Some(sealed) => envelope::decrypt(sealed, passphrase),
        None => {
            let _ = envelope::decrypt(&decoy_envelope(), passphrase);
            Err(VaultError::NotFound(name.to_string()))
        }
    }
}

/// A well-formed envelope (header plus empty ciphertext and tag) that
/// never authenticates.
fn decoy_envelope() -> String {
    BASE64.encode([0u8; ENVELOPE_HEADER_LEN + TAG_LEN])
}

/// Validate a name for a new entry.
///
/// Lookups never apply these rules, so keys written by other tools stay
/// reachable.  Must be non-empty, at most 256 bytes, free of control characters,
/// and without leading or trailing whitespace.
pub fn validate_secret_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(VaultError::InvalidName("secret name cannot be empty".into()));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(VaultError::InvalidName(format!(
            "secret name cannot exceed {MAX_NAME_LEN} bytes"
        )));
    }
    if name.trim() != name {
        return Err(VaultError::InvalidName(format!(
            "secret name '{name}' cannot start or end with whitespace"
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(VaultError::InvalidName(
            "secret name cannot contain control characters".into(),
        ));
    }
    Ok(())
}
