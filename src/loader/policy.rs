//! Tier merge policy for the optional local override tier
//!
//! Deployments have disagreed on whether, when, and where a per-user tier is
//! merged. The strategy is therefore chosen explicitly per loader instead of
//! being hard-coded.

use serde::{Deserialize, Serialize};

/// Scope segment used for per-user tiers: `/local/<user>/`.
pub const LOCAL_SCOPE: &str = "local";
pub const CONFIG_USER_VAR: &str = "CONFIG_USER";
pub const USER_VAR: &str = "USER";

/// Whether a per-user tier is fetched, and for which user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LocalOverride {
    /// Global and service tiers only.
    #[default]
    Disabled,
    /// User named by `$CONFIG_USER`; skipped when unset or empty.
    ConfigUser,
    /// `$USER`, but only when it equals the loader's environment.
    EnvironmentIsUser,
    /// Always this user.
    Fixed(String),
}

/// Where the local tier sits relative to the service tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocalPlacement {
    /// global < local < service
    #[default]
    BetweenGlobalAndService,
    /// global < service < local
    AboveService,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePolicy {
    pub local: LocalOverride,
    pub placement: LocalPlacement,
}

impl MergePolicy {
    pub fn new(local: LocalOverride, placement: LocalPlacement) -> Self {
        Self { local, placement }
    }

    /// User whose local tier should be merged, if any.
    ///
    /// `lookup` reads a process environment variable.
    pub fn local_user<F>(&self, environment: &str, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        match &self.local {
            LocalOverride::Disabled => None,
            LocalOverride::ConfigUser => lookup(CONFIG_USER_VAR)
                .map(|user| user.trim().to_string())
                .filter(|user| !user.is_empty()),
            LocalOverride::EnvironmentIsUser => {
                lookup(USER_VAR).filter(|user| !user.is_empty() && user == environment)
            }
            LocalOverride::Fixed(user) => Some(user.clone()),
        }
    }
}

/// Reads the real process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
