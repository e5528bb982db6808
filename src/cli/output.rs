//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{Entry, VaultMetadata};

/// What a hidden secret looks like in tables.
pub const SECRET_MASK: &str = "\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print the vault's metadata labels.
pub fn print_metadata(metadata: &VaultMetadata) {
    println!(
        "{} {}   {} {}",
        style("Algorithm:").bold(),
        metadata.algorithm_label,
        style("Security level:").bold(),
        metadata.security_level
    );
}

/// Print a table of entries (#, Site, Username, masked Secret).
pub fn print_entries_table(entries: &[Entry]) {
    if entries.is_empty() {
        info("No entries yet.");
        tip("Run `passvault add --site <SITE>` to add your first entry.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Site", "Username", "Secret"]);

    for (i, e) in entries.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            e.site.clone(),
            display_username(&e.username).to_string(),
            SECRET_MASK.to_string(),
        ]);
    }

    println!("{table}");
}

/// Print every field of one entry.
pub fn print_entry_details(position: usize, entry: &Entry) {
    println!("{} {}", style("Entry").bold(), position);
    println!("  {}     {}", style("Site:").dim(), entry.site);
    println!("  {} {}", style("Username:").dim(), display_username(&entry.username));
    println!("  {}   {}", style("Secret:").dim(), entry.secret);
    if !entry.note.is_empty() {
        println!("  {}     {}", style("Note:").dim(), entry.note);
    }
}

fn display_username(username: &str) -> &str {
    if username.is_empty() {
        "(no username)"
    } else {
        username
    }
}
