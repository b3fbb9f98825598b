use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{Result, VaultError};

/// User-level configuration, loaded from `<config_dir>/deevault/config.toml`.
///
/// Every field has a sensible default so deevault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Vault file location.  `~/` is expanded.  Default: `~/.secrets.json`.
    #[serde(default)]
    pub vault_file: Option<PathBuf>,

    /// Minimum length for a newly chosen passphrase (default: 8).
    /// Never applied when decrypting.
    #[serde(default = "default_min_passphrase_len")]
    pub min_passphrase_len: usize,

    /// Ask for a new passphrase twice before encrypting (default: true).
    #[serde(default = "default_confirm_passphrase")]
    pub confirm_passphrase: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_min_passphrase_len() -> usize {
    8
}

fn default_confirm_passphrase() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: None,
            min_passphrase_len: default_min_passphrase_len(),
            confirm_passphrase: default_confirm_passphrase(),
        }
    }
}

impl Settings {
    /// Directory under the platform config dir that holds our config.
    const APP_DIR: &'static str = "deevault";

    /// Name of the config file inside `APP_DIR`.
    const FILE_NAME: &'static str = "config.toml";

    /// Vault file name under the home directory when nothing is configured.
    pub const DEFAULT_VAULT_FILE: &'static str = ".secrets.json";

    /// Load settings from `path`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| VaultError::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// `<config_dir>/deevault/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(Self::APP_DIR).join(Self::FILE_NAME))
    }

    /// Decide which vault file to use.
    ///
    /// Precedence: explicit override (CLI flag / `DEEVAULT_FILE`), then
    /// `vault_file` from the config, then `~/.secrets.json`.
    pub fn resolve_vault_file(&self, override_path: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = override_path {
            return Ok(path.to_path_buf());
        }

        let home = dirs::home_dir();
        match &self.vault_file {
            Some(configured) => Ok(expand_home(configured, home.as_deref())),
            None => home
                .map(|h| h.join(Self::DEFAULT_VAULT_FILE))
                .ok_or_else(|| {
                    VaultError::Config(
                        "cannot determine home directory — set --vault-file".into(),
                    )
                }),
        }
    }
}

/// Replace a leading `~` component with the home directory.
fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

// ── Tests ────────────────────────────────────────────────────────────
