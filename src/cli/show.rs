//! Show command implementation

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{Map, Value as JsonValue};
use std::path::Path;

use super::utils::{build_loader, resolve_settings, TargetArgs};

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print key names only
    #[arg(long, conflicts_with = "json")]
    pub keys_only: bool,

    /// Print the snapshot as a JSON object
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ShowArgs, config: Option<&Path>) -> Result<()> {
    let settings = resolve_settings(&args.target, config)?;
    let loader = build_loader(&settings)?;
    loader.initialize().context("Error loading configuration")?;

    let snapshot = loader.snapshot();

    if args.json {
        let object: Map<String, JsonValue> = snapshot
            .iter()
            .map(|(key, value)| (key.to_string(), JsonValue::String(value.to_string())))
            .collect();
        println!("{}", serde_json::to_string_pretty(&object)?);
        return Ok(());
    }

    for (key, value) in snapshot.iter() {
        if args.keys_only {
            println!("{}", key);
        } else {
            println!("{}={}", key, value);
        }
    }

    if snapshot.is_empty() {
        eprintln!(
            "No parameters found under {} or {}",
            loader.service_prefix(),
            loader.global_prefix()
        );
    }

    Ok(())
}
