//! Parameter store client seam
//!
//! The loader only needs two capabilities from the backing store: a paginated,
//! prefix-scoped listing and a single-parameter write. Everything else
//! (encryption, access control, persistence) belongs to the store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Bound;
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Page size used by the bundled stores when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Parameter {name} rejected: {reason}")]
    Rejected { name: String, reason: String },

    #[error("Parameter store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Parameter store data is corrupt: {reason}")]
    Corrupt { reason: String },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A single `(full name, value)` pair returned by a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterPage {
    pub parameters: Vec<Parameter>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub path: String,
    pub recursive: bool,
    pub with_decryption: bool,
    pub next_token: Option<String>,
}

impl ListRequest {
    /// Recursive, decrypted listing of everything under `path`.
    pub fn recursive(path: impl Into<String>) -> Self {
        Self { path: path.into(), recursive: true, with_decryption: true, next_token: None }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.next_token = token;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterKind {
    String,
    #[default]
    SecureString,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutRequest {
    pub name: String,
    pub value: String,
    pub kind: ParameterKind,
    pub overwrite: bool,
}

impl PutRequest {
    /// Encrypted write that replaces any existing value.
    pub fn secure(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: ParameterKind::SecureString,
            overwrite: true,
        }
    }
}

/// Client capability required from the remote store.
pub trait ParameterStore: Send + Sync {
    fn list_by_prefix(&self, request: &ListRequest) -> StoreResult<ParameterPage>;

    fn put(&self, request: &PutRequest) -> StoreResult<()>;
}

impl<T: ParameterStore + ?Sized> ParameterStore for &T {
    fn list_by_prefix(&self, request: &ListRequest) -> StoreResult<ParameterPage> {
        (**self).list_by_prefix(request)
    }

    fn put(&self, request: &PutRequest) -> StoreResult<()> {
        (**self).put(request)
    }
}

impl<T: ParameterStore + ?Sized> ParameterStore for std::sync::Arc<T> {
    fn list_by_prefix(&self, request: &ListRequest) -> StoreResult<ParameterPage> {
        (**self).list_by_prefix(request)
    }

    fn put(&self, request: &PutRequest) -> StoreResult<()> {
        (**self).put(request)
    }
}

/// What the bundled stores keep per parameter name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredParameter {
    pub value: String,
    #[serde(default)]
    pub kind: ParameterKind,
}

/// Checks a write the way the remote store does before accepting it.
pub(crate) fn validate_put(
    entries: &BTreeMap<String, StoredParameter>,
    request: &PutRequest,
) -> StoreResult<()> {
    let reject = |reason: &str| StoreError::Rejected {
        name: request.name.clone(),
        reason: reason.to_string(),
    };

    if !request.name.starts_with('/') || request.name.ends_with('/') {
        return Err(reject("name must start with '/' and must not end with '/'"));
    }
    if request.name.contains("//") {
        return Err(reject("name must not contain empty path segments"));
    }
    if request.value.is_empty() {
        return Err(reject("value must not be empty"));
    }
    if !request.overwrite && entries.contains_key(&request.name) {
        return Err(reject("parameter already exists and overwrite is disabled"));
    }
    Ok(())
}

/// Slice one page out of a sorted parameter map.
///
/// The continuation token is the last name returned; the following page starts
/// strictly after it. A token is only handed out while more matches remain.
pub(crate) fn paginate(
    entries: &BTreeMap<String, StoredParameter>,
    request: &ListRequest,
    page_size: usize,
) -> StoreResult<ParameterPage> {
    if !request.path.starts_with('/') {
        return Err(StoreError::Rejected {
            name: request.path.clone(),
            reason: "path must start with '/'".to_string(),
        });
    }

    let lower = match &request.next_token {
        Some(token) => Bound::Excluded(token.clone()),
        None => Bound::Included(request.path.clone()),
    };

    let mut matches = entries
        .range((lower, Bound::Unbounded))
        .take_while(|(name, _)| name.starts_with(&request.path))
        .filter(|(name, _)| request.recursive || !name[request.path.len()..].contains('/'));

    let page_size = page_size.max(1);
    let parameters: Vec<Parameter> = matches
        .by_ref()
        .take(page_size)
        .map(|(name, stored)| Parameter::new(name.clone(), stored.value.clone()))
        .collect();

    let next_token = match (parameters.last(), matches.next()) {
        (Some(last), Some(_)) => Some(last.name.clone()),
        _ => None,
    };

    Ok(ParameterPage { parameters, next_token })
}
