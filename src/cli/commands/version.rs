//! `passvault version`: display version and crypto parameters.

use console::style;

use crate::crypto::{NONCE_LEN, PBKDF2_ITERATIONS, SALT_LEN};
use crate::errors::Result;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    let current = env!("CARGO_PKG_VERSION");
    println!("passvault {current}");
    println!(
        "{}",
        style(format!(
            "AES-256-GCM, PBKDF2-HMAC-SHA256 ({PBKDF2_ITERATIONS} rounds), \
             {SALT_LEN}-byte salt, {NONCE_LEN}-byte nonce"
        ))
        .dim()
    );
    Ok(())
}
