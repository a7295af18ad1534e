//! pathsize: lazy, memoized disk usage reporter.
//!
//! Thin binary entry point. All logic lives in the `pathsize-core`
//! and `pathsize-cli` crates.

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = pathsize_cli::Cli::parse();

    // Initialise structured logging on stderr.
    pathsize_cli::logging::init(cli.log_level());

    tracing::info!("pathsize starting");

    let stdout = std::io::stdout();
    pathsize_cli::run(&cli, &mut stdout.lock())
}
