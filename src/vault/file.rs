//! Reading and writing vault files.
//!
//! This layer moves bytes only; it knows nothing about envelopes.

use std::fs;
use std::path::Path;

use crate::errors::{PassVaultError, Result};

/// Read a vault file's raw bytes.
pub fn read_vault_file(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(PassVaultError::VaultNotFound(path.to_path_buf()));
    }
    Ok(fs::read(path)?)
}

/// Write a vault file **atomically**.
///
/// Writes to a temp file in the same directory, restricts it to the
/// owner on Unix, then renames it over `path` so readers never see a
/// half-written file.
pub fn write_vault_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, bytes)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
    }

    fs::rename(&tmp_path, path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote vault file");
    Ok(())
}
