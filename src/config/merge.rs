//! Command-line overrides on top of loaded settings

use super::Settings;
use std::path::PathBuf;

/// Values given on the command line; `None` keeps the loaded setting.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub environment: Option<String>,
    pub service: Option<String>,
    pub store_path: Option<PathBuf>,
    pub page_size: Option<usize>,
}

pub fn merge_cli_with_settings(mut settings: Settings, cli: CliOverrides) -> Settings {
    if let Some(environment) = cli.environment {
        settings.environment = Some(environment);
    }
    if let Some(service) = cli.service {
        settings.service = Some(service);
    }
    if let Some(store_path) = cli.store_path {
        settings.store_path = store_path;
    }
    if let Some(page_size) = cli.page_size {
        settings.page_size = page_size;
    }
    settings
}
