//! Settings file discovery and layered loading

use super::Settings;
use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "PARAMSTORE_";

/// Load settings from defaults, a settings file and `PARAMSTORE_*` variables.
///
/// An explicit `config_path` must exist and parse. A file found by discovery
/// in `dir` that fails to parse is skipped with a warning.
pub fn load_settings(dir: &Path, config_path: Option<&Path>) -> Result<Settings> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Settings file does not exist: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => discover_settings(dir),
    };

    let Some(settings_file) = discovered else {
        return extract(base());
    };

    let ext =
        settings_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let with_file = match ext.as_str() {
        "toml" => Ok(base().merge(Toml::file(&settings_file))),
        "yaml" | "yml" => Ok(base().merge(Yaml::file(&settings_file))),
        other => Err(anyhow::anyhow!(
            "Unsupported settings extension '.{}' for file {}",
            other,
            settings_file.display()
        )),
    };

    let parsed = with_file.and_then(|figment| {
        extract(figment)
            .with_context(|| format!("Invalid settings file: {}", settings_file.display()))
    });

    match parsed {
        Ok(settings) => Ok(settings),
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            tracing::warn!(
                "Failed to load auto-discovered settings {}: {:#}",
                settings_file.display(),
                e
            );
            extract(base())
        }
    }
}

fn base() -> Figment {
    Figment::from(Serialized::defaults(Settings::default()))
}

fn extract(figment: Figment) -> Result<Settings> {
    figment
        .merge(Env::prefixed(ENV_PREFIX))
        .extract::<Settings>()
        .context("Invalid settings")
}

fn discover_settings(dir: &Path) -> Option<PathBuf> {
    let candidates = ["paramstore.toml", ".paramstore.toml", "paramstore.yaml", "paramstore.yml"];

    for candidate in candidates {
        let path = dir.join(candidate);
        if path.exists() {
            return Some(path);
        }
    }

    None
}
