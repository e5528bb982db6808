//! `passvault show`: print one entry, secret included.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `show` command.  `position` is 1-based, as printed by `list`.
pub fn execute(cli: &Cli, position: usize) -> Result<()> {
    let vault = open_vault(cli)?;

    let entry = position
        .checked_sub(1)
        .and_then(|i| vault.session.entry(i))
        .ok_or(PassVaultError::EntryNotFound(position))?;

    output::print_entry_details(position, entry);
    Ok(())
}
