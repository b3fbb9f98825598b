//! `deevault delete` — remove a secret after passphrase proof.

use crate::cli::output;
use crate::cli::{load_settings, open_store, read_passphrase, Cli, TerminalPrompter};
use crate::errors::{Result, VaultError};
use crate::vault::Outcome;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let settings = load_settings(cli)?;
    let store = open_store(cli, &settings)?;
    let mut prompter = TerminalPrompter;

    // Report an unknown name before asking for a passphrase.
    if !store.contains(name)? {
        return Err(VaultError::NotFound(name.to_string()));
    }

    let passphrase = read_passphrase(
        &mut prompter,
        "Enter passphrase for secret to confirm deletion",
    )?;

    match store.delete(name, &passphrase, &mut prompter) {
        Ok(Outcome::Done(())) => output::success(&format!("Secret '{name}' deleted")),
        Ok(Outcome::Aborted) => output::info("Aborted by user."),
        Err(VaultError::Authentication) => {
            output::warning("Passphrase incorrect or decryption failed. Aborting deletion.");
            return Err(VaultError::Authentication);
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
