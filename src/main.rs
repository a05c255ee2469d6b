//! reelmeta - look up movie metadata from the command line.

use clap::Parser;
use reelmeta::cli;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging on stderr so JSON output stays clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("reelmeta=info".parse()?))
        .init();

    cli::run_command(&args)
}
