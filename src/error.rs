//! Error types shared by the loader and the store seam

use crate::store::StoreError;
use thiserror::Error;

/// Recoverable failures from `initialize`, `get`, `put`, `import` and the
/// fallible typed accessors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("[{service}] Could not find value for key: {key}")]
    NotFound { service: String, key: String },

    #[error("[{service}] Could not fetch environment variable ({name})")]
    MissingEnv { service: String, name: String },

    #[error("[{service}] Config value at ({key}) was not {expected}: {reason}")]
    InvalidValue { service: String, key: String, expected: &'static str, reason: String },

    #[error("Unable to parse json data: {reason}")]
    InvalidDocument { reason: String },

    #[error("Error writing key ({key}) to parameter store: {source}")]
    ImportFailed {
        key: String,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("Invalid parameter prefix '{value}': {reason}")]
    InvalidPrefix { value: String, reason: &'static str },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

impl ConfigError {
    /// Key the error refers to, when there is one.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::NotFound { key, .. }
            | ConfigError::InvalidValue { key, .. }
            | ConfigError::ImportFailed { key, .. } => Some(key),
            ConfigError::MissingEnv { name, .. } => Some(name),
            _ => None,
        }
    }
}
