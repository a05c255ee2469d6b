//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `lookup`: Keyword search and fetch-by-ID
//! - `cache`: Provider listing and cache inspection

mod cache;
mod lookup;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::engine::Engine;

pub use cache::{cmd_cached, cmd_providers};
pub use lookup::{cmd_info, cmd_search};

/// reelmeta CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: OS config directory)
    #[arg(long, global = true, env = "REELMETA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Cache database path (overrides the config file)
    #[arg(long, global = true, env = "REELMETA_DB")]
    pub db: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Search for a movie by keyword
    Search {
        /// Movie number, ID, or title keyword
        keyword: String,
        /// Only search this provider (default: all providers)
        #[arg(short, long)]
        provider: Option<String>,
        /// Skip the cache and always query providers
        #[arg(long)]
        no_lazy: bool,
    },
    /// Fetch full movie info by provider ID
    Info {
        /// Provider-local movie ID
        id: String,
        /// Provider to fetch from
        #[arg(short, long)]
        provider: String,
        /// Skip the cache and always query the provider
        #[arg(long)]
        no_lazy: bool,
    },
    /// List registered providers
    Providers,
    /// List cached movie records
    Cached {
        /// Only show records from this provider
        #[arg(short, long)]
        provider: Option<String>,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let config = load_config(cli.config.as_deref());
    let engine = rt.block_on(Engine::from_config(&config, cli.db.as_deref()))?;

    match &cli.command {
        Commands::Search {
            keyword,
            provider,
            no_lazy,
        } => cmd_search(
            &rt,
            &engine,
            keyword,
            provider.as_deref(),
            config.search.lazy && !no_lazy,
            cli.json,
        ),
        Commands::Info {
            id,
            provider,
            no_lazy,
        } => cmd_info(
            &rt,
            &engine,
            id,
            provider,
            config.search.lazy && !no_lazy,
            cli.json,
        ),
        Commands::Providers => cmd_providers(&engine, cli.json),
        Commands::Cached { provider } => cmd_cached(&rt, &engine, provider.as_deref(), cli.json),
    }
}

fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(path) => config::load_from(path),
        None => config::load(),
    }
}
