//! One module per subcommand.

pub mod add;
pub mod check;
pub mod completions;
pub mod init;
pub mod list;
pub mod show;
pub mod version;
