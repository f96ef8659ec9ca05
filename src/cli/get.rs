//! Get command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;

use super::utils::{build_loader, resolve_settings, TargetArgs};

#[derive(Args)]
pub struct GetArgs {
    /// Local key, e.g. `db_url`
    #[arg(value_name = "KEY")]
    pub key: String,

    #[command(flatten)]
    pub target: TargetArgs,
}

pub fn run(args: GetArgs, config: Option<&Path>) -> Result<()> {
    let settings = resolve_settings(&args.target, config)?;
    let loader = build_loader(&settings)?;
    loader.initialize().context("Error loading configuration")?;

    let value = loader.get(&args.key)?;
    println!("{}", value);
    Ok(())
}
