//! CLI module — Clap argument parser, terminal prompter, output helpers,
//! and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::vault::{Prompter, VaultStore};

/// Environment variable holding the passphrase for scripted use.
pub const PASSPHRASE_ENV: &str = "DEEVAULT_PASSPHRASE";

/// deevault: passphrase-protected secrets vault.
#[derive(Parser)]
#[command(
    name = "deevault",
    about = "Passphrase-protected personal secrets vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: ~/.secrets.json)
    #[arg(long, env = "DEEVAULT_FILE", global = true)]
    pub vault_file: Option<PathBuf>,

    /// Config file (default: <config dir>/deevault/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print diagnostic logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt a secret and save it to the vault
    Put {
        /// Secret name (e.g. github, aws, stripe)
        name: String,
        /// Secret value (omit for interactive prompt)
        #[arg(long)]
        value: Option<String>,
    },

    /// Decrypt and display a secret
    Get {
        /// Secret name
        name: String,
    },

    /// Delete a secret after verifying its passphrase
    Delete {
        /// Secret name
        name: String,
    },

    /// List stored secret names
    List,
}

// ---------------------------------------------------------------------------
// Terminal prompter
// ---------------------------------------------------------------------------

/// `Prompter` backed by the controlling terminal via `dialoguer`.
///
/// Confirmations default to "no"; hidden input never echoes.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))
    }

    fn read_secret(&mut self, prompt: &str) -> Result<Zeroizing<String>> {
        let line = dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?;
        Ok(Zeroizing::new(line))
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from `--config` or the default config location.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    match cli.config.as_deref() {
        Some(path) => Settings::load(path),
        None => match Settings::default_path() {
            Some(path) => Settings::load(&path),
            None => Ok(Settings::default()),
        },
    }
}

/// Build the store for the vault file chosen by flag, env, or config.
pub fn open_store(cli: &Cli, settings: &Settings) -> Result<VaultStore> {
    let path = settings.resolve_vault_file(cli.vault_file.as_deref())?;
    Ok(VaultStore::new(path))
}

/// Get an existing passphrase, trying in order:
/// 1. `DEEVAULT_PASSPHRASE` env var (scripts)
/// 2. Hidden interactive prompt
///
/// Surrounding whitespace is trimmed, matching how passphrases were
/// always read.
pub fn read_passphrase<P: Prompter + ?Sized>(
    prompter: &mut P,
    prompt: &str,
) -> Result<Zeroizing<String>> {
    if let Some(pw) = passphrase_from_env() {
        return Ok(pw);
    }
    let raw = prompter.read_secret(prompt)?;
    Ok(Zeroizing::new(raw.trim().to_string()))
}

/// Get a new passphrase for encryption.
///
/// Also respects `DEEVAULT_PASSPHRASE` for scripted usage.  Enforces the
/// configured minimum length.
pub fn prompt_new_passphrase<P: Prompter + ?Sized>(
    prompter: &mut P,
    settings: &Settings,
) -> Result<Zeroizing<String>> {
    if let Some(pw) = passphrase_from_env() {
        check_strength(&pw, settings)?;
        return Ok(pw);
    }
    choose_passphrase(prompter, settings)
}

/// Interactive half of `prompt_new_passphrase`: ask, check, confirm.
pub fn choose_passphrase<P: Prompter + ?Sized>(
    prompter: &mut P,
    settings: &Settings,
) -> Result<Zeroizing<String>> {
    let first = prompter.read_secret("Enter passphrase to encrypt secret")?;
    let passphrase = Zeroizing::new(first.trim().to_string());
    check_strength(&passphrase, settings)?;

    if settings.confirm_passphrase {
        let second = prompter.read_secret("Confirm passphrase")?;
        let matches: bool = passphrase
            .as_bytes()
            .ct_eq(second.trim().as_bytes())
            .into();
        if !matches {
            return Err(VaultError::PassphraseMismatch);
        }
    }

    Ok(passphrase)
}

fn passphrase_from_env() -> Option<Zeroizing<String>> {
    let pw = Zeroizing::new(std::env::var(PASSPHRASE_ENV).ok()?);
    if pw.is_empty() {
        None
    } else {
        Some(pw)
    }
}

fn check_strength(passphrase: &str, settings: &Settings) -> Result<()> {
    if passphrase.chars().count() < settings.min_passphrase_len {
        return Err(VaultError::WeakPassphrase(settings.min_passphrase_len));
    }
    Ok(())
}
