//! `deevault get` — decrypt a secret and print its value.

use crate::cli::output;
use crate::cli::{load_settings, open_store, read_passphrase, Cli, TerminalPrompter};
use crate::errors::Result;
use crate::vault::Outcome;

/// Execute the `get` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let settings = load_settings(cli)?;
    let store = open_store(cli, &settings)?;
    let mut prompter = TerminalPrompter;

    let passphrase = read_passphrase(&mut prompter, "Enter passphrase to decrypt secret")?;

    // The store asks for display confirmation after a successful decrypt.
    match store.get(name, &passphrase, &mut prompter)? {
        Outcome::Done(value) => println!("{}", value.as_str()),
        Outcome::Aborted => output::info("Aborted by user."),
    }

    Ok(())
}
