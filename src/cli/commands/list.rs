//! `passvault list`: display all entries in a table.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let vault = open_vault(cli)?;

    output::info(&format!(
        "{} — {} entr{}",
        vault.path.display(),
        vault.session.len(),
        if vault.session.len() == 1 { "y" } else { "ies" }
    ));
    output::print_metadata(vault.session.metadata());
    output::print_entries_table(vault.session.entries());

    Ok(())
}
