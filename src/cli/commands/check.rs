//! `passvault check`: verify a file is a vault without decrypting it.

use crate::cli::output;
use crate::cli::{vault_path, Cli};
use crate::errors::Result;
use crate::vault::file::read_vault_file;
use crate::vault::Envelope;

/// Execute the `check` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = vault_path(cli)?;
    let bytes = read_vault_file(&path)?;
    let envelope = Envelope::from_bytes(&bytes)?;

    if envelope.is_encrypted() {
        output::success(&format!("{} is an encrypted vault", path.display()));
    } else {
        output::success(&format!("{} is a plaintext vault", path.display()));
        output::warning("Anyone who can read this file can read every entry.");
    }

    Ok(())
}
