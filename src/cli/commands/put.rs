//! `deevault put` — encrypt a secret and save it to the vault.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{load_settings, open_store, prompt_new_passphrase, Cli, TerminalPrompter};
use crate::errors::Result;
use crate::vault::{validate_secret_name, Outcome, Prompter};

/// Execute the `put` command.
pub fn execute(cli: &Cli, name: &str, value: Option<&str>) -> Result<()> {
    // Fail on a bad name before asking for anything.
    validate_secret_name(name)?;

    let settings = load_settings(cli)?;
    let store = open_store(cli, &settings)?;
    let mut prompter = TerminalPrompter;

    output::warning("If you forget this passphrase, the secret cannot be recovered.");
    output::tip("Save your passphrase somewhere safe (e.g. a password manager).");

    if store.contains(name)? {
        output::warning(&format!(
            "Secret '{name}' already exists — you will be asked before it is overwritten."
        ));
    }

    let secret_value = read_value(name, value, &mut prompter)?;
    let passphrase = prompt_new_passphrase(&mut prompter, &settings)?;

    match store.put(name, &secret_value, &passphrase, &mut prompter)? {
        Outcome::Done(()) => output::success(&format!(
            "Secret '{name}' encrypted and saved to {}",
            store.path().display()
        )),
        Outcome::Aborted => output::info("Aborted by user."),
    }

    Ok(())
}

/// Determine the secret value from one of three sources.
fn read_value<P: Prompter + ?Sized>(
    name: &str,
    value: Option<&str>,
    prompter: &mut P,
) -> Result<Zeroizing<String>> {
    if let Some(v) = value {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        return Ok(Zeroizing::new(v.to_string()));
    }

    if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        return Ok(Zeroizing::new(buf.trim().to_string()));
    }

    // Source 3: Interactive hidden prompt (default).
    let line = prompter.read_secret(&format!("Enter value for {name}"))?;
    Ok(Zeroizing::new(line.trim().to_string()))
}
