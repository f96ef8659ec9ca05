//! Import command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::utils::{build_loader, resolve_settings, usage, TargetArgs};

#[derive(Args)]
pub struct ImportArgs {
    /// Path to the flat JSON file to import
    #[arg(short = 'f', long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub target: TargetArgs,
}

pub fn run(args: ImportArgs, config: Option<&Path>) -> Result<()> {
    let Some(file) = args.file.as_deref() else {
        anyhow::bail!("Missing parameter --file\n\n{}", usage());
    };

    let settings = resolve_settings(&args.target, config)?;
    let loader = build_loader(&settings).context("Error creating loader")?;

    if !file.exists() {
        anyhow::bail!("Given file does not exist: {}", file.display());
    }
    let data = std::fs::read(file)
        .with_context(|| format!("Error reading file {}", file.display()))?;

    let report = loader.import(&data).context("Error importing data")?;
    tracing::debug!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        store = %settings.store_path.display(),
        "import finished"
    );

    println!("Json from {} successfully loaded", file.display());
    Ok(())
}
