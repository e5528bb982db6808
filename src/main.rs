use std::io;

use clap::Parser;
use passvault::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "PASSVAULT_LOG";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init {
            ref algorithm,
            ref security_level,
            plaintext,
            force,
        } => passvault::cli::commands::init::execute(
            &cli,
            algorithm.as_deref(),
            security_level.as_deref(),
            plaintext,
            force,
        ),
        Commands::Add {
            ref site,
            ref username,
            ref note,
            ref secret,
        } => passvault::cli::commands::add::execute(&cli, site, username, note, secret.as_deref()),
        Commands::List => passvault::cli::commands::list::execute(&cli),
        Commands::Show { position } => passvault::cli::commands::show::execute(&cli, position),
        Commands::Check => passvault::cli::commands::check::execute(&cli),
        Commands::Version => passvault::cli::commands::version::execute(),
        Commands::Completions { ref shell } => passvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Send `tracing` output to stderr.  `PASSVAULT_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "passvault=debug" } else { "error" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
