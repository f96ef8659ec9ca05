//! Command-line interface for paramstore-config
//!
//! Provides `import`, `show` and `get` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod get;
mod import;
mod show;
mod utils;

/// Import and inspect tiered service configuration in a parameter store
#[derive(Parser)]
#[command(name = "paramstore-config")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (TOML or YAML); defaults to ./paramstore.{toml,yaml,yml}
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a flat JSON file into the store at /<env>/<service>/<key>
    Import(import::ImportArgs),

    /// Print the merged configuration a service would load
    Show(show::ShowArgs),

    /// Print a single merged value
    Get(get::GetArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Import(args) => import::run(args, config),
        Commands::Show(args) => show::run(args, config),
        Commands::Get(args) => get::run(args, config),
    }
}
