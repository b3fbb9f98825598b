//! `deevault list` — show the names of stored secrets.

use crate::cli::output;
use crate::cli::{load_settings, open_store, Cli};
use crate::errors::Result;

/// Execute the `list` command.  No passphrase needed; nothing is decrypted.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    let store = open_store(cli, &settings)?;

    let names = store.names()?;
    output::print_names_table(store.path(), &names);

    Ok(())
}
