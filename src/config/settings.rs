//! Tool settings and their conversion into loader inputs

use crate::loader::{LocalOverride, LocalPlacement, MergePolicy};
use crate::store::{FileStore, DEFAULT_PAGE_SIZE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_STORE_PATH: &str = "paramstore.json";

/// Flat, serializable form of [`LocalOverride`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocalOverrideMode {
    #[default]
    Disabled,
    ConfigUser,
    EnvironmentIsUser,
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub environment: Option<String>,
    pub service: Option<String>,
    pub store_path: PathBuf,
    pub page_size: usize,
    pub local_override: LocalOverrideMode,
    pub local_user: Option<String>,
    pub local_placement: LocalPlacement,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: None,
            service: None,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            page_size: DEFAULT_PAGE_SIZE,
            local_override: LocalOverrideMode::Disabled,
            local_user: None,
            local_placement: LocalPlacement::default(),
        }
    }
}

impl Settings {
    pub fn merge_policy(&self) -> Result<MergePolicy> {
        let local = match self.local_override {
            LocalOverrideMode::Disabled => LocalOverride::Disabled,
            LocalOverrideMode::ConfigUser => LocalOverride::ConfigUser,
            LocalOverrideMode::EnvironmentIsUser => LocalOverride::EnvironmentIsUser,
            LocalOverrideMode::Fixed => {
                let user = self
                    .local_user
                    .as_deref()
                    .map(str::trim)
                    .filter(|user| !user.is_empty())
                    .context("local_override = \"fixed\" requires local_user")?;
                LocalOverride::Fixed(user.to_string())
            }
        };
        Ok(MergePolicy::new(local, self.local_placement))
    }

    pub fn file_store(&self) -> FileStore {
        FileStore::new(&self.store_path).page_size(self.page_size)
    }
}
