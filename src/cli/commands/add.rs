//! `passvault add`: append an entry and re-save the vault.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::file::write_vault_file;
use crate::vault::Entry;

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    site: &str,
    username: &str,
    note: &str,
    secret: Option<&str>,
) -> Result<()> {
    // Open first so a wrong password fails before we ask for the secret.
    let mut vault = open_vault(cli)?;

    let secret_value = if let Some(v) = secret {
        // Source 1: Inline value on the command line.
        output::warning("Secret provided on command line — it may appear in shell history.");
        Zeroizing::new(v.to_string())
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(buf.trim_end().to_string())
    } else {
        // Source 3: Interactive secure prompt (default).
        let v = dialoguer::Password::new()
            .with_prompt(format!("Enter secret for {site}"))
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?;
        Zeroizing::new(v)
    };

    vault.session.add_entry(Entry::new(
        site.trim(),
        username.trim(),
        secret_value.as_str(),
        note.trim(),
    ));

    let bytes = vault.session.save(&vault.password)?;
    write_vault_file(&vault.path, &bytes)?;

    output::success(&format!(
        "Entry '{}' added ({} total)",
        site.trim(),
        vault.session.len()
    ));
    if vault.password.is_empty() {
        output::warning("Vault has no password — entries are stored in plain text.");
    }

    Ok(())
}
