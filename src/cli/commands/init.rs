//! `passvault init`: create a new, empty vault file.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{prompt_new_password, vault_path, Cli};
use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::vault::file::write_vault_file;
use crate::vault::VaultSession;

/// Execute the `init` command.
pub fn execute(
    cli: &Cli,
    algorithm: Option<&str>,
    security_level: Option<&str>,
    plaintext: bool,
    force: bool,
) -> Result<()> {
    let path = vault_path(cli)?;

    // 1. Refuse to clobber an existing vault unless asked to.
    if path.exists() && !force {
        output::tip("Use `passvault add` to add entries to the existing vault.");
        return Err(PassVaultError::VaultAlreadyExists(path));
    }

    // 2. Pick the password (empty means no encryption).
    let password = if plaintext {
        Zeroizing::new(String::new())
    } else {
        prompt_new_password()?
    };

    // 3. Build the empty vault with metadata from flags or settings.
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let mut session = VaultSession::new();
    session.create_new(settings.metadata(algorithm, security_level));

    // 4. Seal and write it.
    let bytes = session.save(&password)?;
    write_vault_file(&path, &bytes)?;

    if password.is_empty() {
        output::warning("Vault has no password — entries are stored in plain text.");
    }
    output::success(&format!("Vault created at {}", path.display()));
    output::tip("Run `passvault add --site <SITE>` to add an entry.");

    Ok(())
}
