//! Shared CLI utilities.

use anyhow::{Context, Result};
use clap::Args;
use paramstore_config::config::{load_settings, merge_cli_with_settings, CliOverrides, Settings};
use paramstore_config::{FileStore, Loader};
use std::path::{Path, PathBuf};

/// Store location and identity flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Environment namespace, used as the first key prefix segment
    #[arg(short = 'e', long = "env", value_name = "ENV")]
    pub environment: Option<String>,

    /// Service namespace, used as the second key prefix segment
    #[arg(short = 's', long, value_name = "NAME")]
    pub service: Option<String>,

    /// JSON file backing the parameter store
    #[arg(long = "store", value_name = "PATH")]
    pub store_path: Option<PathBuf>,

    /// Parameters requested per store page
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,
}

impl TargetArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            environment: self.environment.clone(),
            service: self.service.clone(),
            store_path: self.store_path.clone(),
            page_size: self.page_size,
        }
    }
}

/// Settings from the working directory with command-line values on top.
pub fn resolve_settings(target: &TargetArgs, config: Option<&Path>) -> Result<Settings> {
    let cwd = std::env::current_dir().context("Failed resolving current directory")?;
    let settings = load_settings(&cwd, config)?;
    Ok(merge_cli_with_settings(settings, target.overrides()))
}

/// Environment and service, which every command needs.
pub fn require_identity(settings: &Settings) -> Result<(String, String)> {
    let environment = non_empty(settings.environment.as_deref())
        .ok_or_else(|| anyhow::anyhow!("Missing parameter --env\n\n{}", usage()))?;
    let service = non_empty(settings.service.as_deref())
        .ok_or_else(|| anyhow::anyhow!("Missing parameter --service\n\n{}", usage()))?;
    Ok((environment.to_string(), service.to_string()))
}

pub fn build_loader(settings: &Settings) -> Result<Loader<FileStore>> {
    let (environment, service) = require_identity(settings)?;
    let loader = Loader::builder(environment, service, settings.file_store())
        .merge_policy(settings.merge_policy()?)
        .build()?;
    Ok(loader)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn usage() -> &'static str {
    "paramstore-config imports a json file into the parameter store at /<env>/<service>/<key>.\n\
     Usage:\n  \
     paramstore-config import --file /path/to/json/file --env dev --service profile\n   \
     --file is the path to a json file to import\n   \
     --env is the environment that will access this config and is used as a key prefix\n   \
     --service is the name of the service that will access this config and is used as a key prefix"
}
