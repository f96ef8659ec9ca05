//! JSON-file backed parameter store
//!
//! Local stand-in for the remote store: one JSON document holding every
//! parameter. The file is re-read on each listing and rewritten through a
//! sibling temp file on each write.

use super::{
    paginate, validate_put, ListRequest, ParameterPage, ParameterStore, PutRequest, StoreError,
    StoreResult, StoredParameter, DEFAULT_PAGE_SIZE,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    parameters: BTreeMap<String, StoredParameter>,
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    page_size: usize,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), page_size: DEFAULT_PAGE_SIZE, write_lock: Mutex::new(()) }
    }

    /// Set the maximum number of parameters returned per page
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> StoreResult<StoreDocument> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            // A store that was never written to is empty.
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(StoreDocument::default()),
            Err(err) => {
                return Err(StoreError::Unavailable {
                    reason: format!("failed reading {}: {err}", self.path.display()),
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(StoreDocument::default());
        }

        serde_json::from_str(&content).map_err(|err| StoreError::Corrupt {
            reason: format!("{}: {err}", self.path.display()),
        })
    }

    fn write_document(&self, document: &StoreDocument) -> StoreResult<()> {
        let unavailable = |err: std::io::Error| StoreError::Unavailable {
            reason: format!("failed writing {}: {err}", self.path.display()),
        };

        let serialized = serde_json::to_string_pretty(document)
            .map_err(|err| StoreError::Corrupt { reason: err.to_string() })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(unavailable)?;
        }

        let mut tmp_name = self.path.as_os_str().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, serialized).map_err(unavailable)?;
        fs::rename(&tmp_path, &self.path).map_err(unavailable)
    }
}

impl ParameterStore for FileStore {
    fn list_by_prefix(&self, request: &ListRequest) -> StoreResult<ParameterPage> {
        let document = self.read_document()?;
        paginate(&document.parameters, request, self.page_size)
    }

    fn put(&self, request: &PutRequest) -> StoreResult<()> {
        let _guard = self.write_lock.lock();
        let mut document = self.read_document()?;
        validate_put(&document.parameters, request)?;
        document.parameters.insert(
            request.name.clone(),
            StoredParameter { value: request.value.clone(), kind: request.kind },
        );
        self.write_document(&document)?;
        tracing::debug!(name = %request.name, path = %self.path.display(), "parameter written");
        Ok(())
    }
}
