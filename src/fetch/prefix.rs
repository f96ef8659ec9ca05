//! Path prefixes for parameter namespaces

use crate::error::{ConfigError, Result};
use std::fmt;

/// A normalized `/<segment>/.../` namespace.
///
/// Always exactly one leading and one trailing slash, never empty, so that
/// stripping it from a full parameter name is unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prefix(String);

impl Prefix {
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidPrefix {
                value: raw.to_string(),
                reason: "prefix must contain at least one path segment",
            });
        }
        if trimmed.split('/').any(str::is_empty) {
            return Err(ConfigError::InvalidPrefix {
                value: raw.to_string(),
                reason: "prefix must not contain empty path segments",
            });
        }
        Ok(Self(format!("/{trimmed}/")))
    }

    /// Build `/<a>/<b>/` from individual segments.
    pub fn from_segments(segments: &[&str]) -> Result<Self> {
        for segment in segments {
            validate_segment(segment)?;
        }
        Self::new(&segments.join("/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full parameter name for `key` under this prefix.
    pub fn join(&self, key: &str) -> String {
        format!("{}{}", self.0, key)
    }

    /// Local key for a full parameter name.
    ///
    /// Removes the first occurrence of the prefix literal; for names listed
    /// under this prefix that occurrence is at the front.
    pub fn strip(&self, full_name: &str) -> String {
        full_name.replacen(self.0.as_str(), "", 1)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Prefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single namespace component such as an environment or service name.
pub fn validate_segment(segment: &str) -> Result<()> {
    let reason = if segment.trim().is_empty() {
        "segment must not be empty"
    } else if segment.contains('/') {
        "segment must not contain '/'"
    } else if segment.trim() != segment {
        "segment must not have surrounding whitespace"
    } else {
        return Ok(());
    };
    Err(ConfigError::InvalidPrefix { value: segment.to_string(), reason })
}
