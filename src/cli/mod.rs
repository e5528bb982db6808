//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::vault::file::read_vault_file;
use crate::vault::{Envelope, VaultSession};

/// Environment variable that supplies the vault password non-interactively.
pub const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// Passwords shorter than this get a warning (but are accepted).
const WEAK_PASSWORD_LEN: usize = 8;

/// PassVault CLI: a password store in one portable file.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Password store kept in a single portable, optionally encrypted file",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: passwords.json, or `vault_file` from .passvault.toml)
    #[arg(short, long, global = true)]
    pub file: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault file
    Init {
        /// Algorithm label stored in the vault metadata
        #[arg(long)]
        algorithm: Option<String>,

        /// Security level label stored in the vault metadata
        #[arg(long)]
        security_level: Option<String>,

        /// Store entries without encryption (no password)
        #[arg(long)]
        plaintext: bool,

        /// Overwrite an existing vault file
        #[arg(long)]
        force: bool,
    },

    /// Add an entry
    Add {
        /// Site or service name
        #[arg(short, long)]
        site: String,

        /// Username for the site
        #[arg(short, long, default_value = "")]
        username: String,

        /// Free-form note
        #[arg(short, long, default_value = "")]
        note: String,

        /// Secret value (omit for interactive prompt)
        secret: Option<String>,
    },

    /// List entries with secrets masked
    List,

    /// Show one entry in full
    Show {
        /// Entry number as printed by `list` (starting at 1)
        position: usize,
    },

    /// Check that a file is a readable vault, without decrypting it
    Check,

    /// Show version
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// A loaded vault together with where it came from and how to re-save it.
pub struct OpenVault {
    pub path: PathBuf,
    pub session: VaultSession,
    /// Empty for plaintext vaults.
    pub password: Zeroizing<String>,
}

/// Get the vault password, trying in order:
/// 1. `PASSVAULT_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault password")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used during `init`).
///
/// An empty answer is allowed and means "no encryption".  Also respects
/// `PASSVAULT_PASSWORD` for scripted usage.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            warn_if_weak(&pw);
            return Ok(Zeroizing::new(pw));
        }
    }

    let password = dialoguer::Password::new()
        .with_prompt("Choose vault password (leave empty for no encryption)")
        .with_confirmation("Confirm vault password", "Passwords do not match")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;

    warn_if_weak(&password);
    Ok(Zeroizing::new(password))
}

fn warn_if_weak(password: &str) {
    if !password.is_empty() && password.chars().count() < WEAK_PASSWORD_LEN {
        output::warning(&format!(
            "Password is shorter than {WEAK_PASSWORD_LEN} characters and easy to guess."
        ));
    }
}

/// Resolve the vault file path from `--file` or the project settings.
pub fn vault_path(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    Ok(settings.vault_path(&cwd, cli.file.as_deref()))
}

/// Read and decrypt the vault file.
///
/// Plaintext vaults are opened without asking for a password.
pub fn open_vault(cli: &Cli) -> Result<OpenVault> {
    let path = vault_path(cli)?;
    let bytes = read_vault_file(&path)?;

    let password = if Envelope::from_bytes(&bytes)?.is_encrypted() {
        prompt_password()?
    } else {
        Zeroizing::new(String::new())
    };

    let mut session = VaultSession::new();
    session.load(&bytes, &password)?;

    Ok(OpenVault {
        path,
        session,
        password,
    })
}
