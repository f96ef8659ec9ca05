//! In-memory parameter store

use super::{
    paginate, validate_put, ListRequest, ParameterPage, ParameterStore, PutRequest, StoreResult,
    StoredParameter, DEFAULT_PAGE_SIZE,
};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Thread-safe store kept entirely in memory.
///
/// Behaves like the remote store for everything the loader can observe:
/// pagination, recursive listing and write validation.
#[derive(Debug)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, StoredParameter>>,
    page_size: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { entries: RwLock::new(BTreeMap::new()), page_size: DEFAULT_PAGE_SIZE }
    }

    /// Set the maximum number of parameters returned per page
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Seed a parameter without going through write validation.
    pub fn insert(&self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.write().insert(
            name.into(),
            StoredParameter { value: value.into(), kind: Default::default() },
        );
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.entries.read().get(name).map(|stored| stored.value.clone())
    }

    pub fn stored(&self, name: &str) -> Option<StoredParameter> {
        self.entries.read().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl ParameterStore for MemoryStore {
    fn list_by_prefix(&self, request: &ListRequest) -> StoreResult<ParameterPage> {
        let entries = self.entries.read();
        paginate(&entries, request, self.page_size)
    }

    fn put(&self, request: &PutRequest) -> StoreResult<()> {
        let mut entries = self.entries.write();
        validate_put(&entries, request)?;
        entries.insert(
            request.name.clone(),
            StoredParameter { value: request.value.clone(), kind: request.kind },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ParameterKind;

    #[test]
    fn put_then_list_round_trips_through_pages() {
        let store = MemoryStore::new().page_size(1);
        store.put(&PutRequest::secure("/dev/api/a", "1")).expect("put a");
        store.put(&PutRequest::secure("/dev/api/b", "2")).expect("put b");

        let first = store.list_by_prefix(&ListRequest::recursive("/dev/api/")).expect("page 1");
        assert_eq!(first.parameters.len(), 1);
        let second = store
            .list_by_prefix(&ListRequest::recursive("/dev/api/").with_token(first.next_token))
            .expect("page 2");
        assert_eq!(second.parameters[0].value, "2");
        assert!(second.next_token.is_none());
    }

    #[test]
    fn put_records_secure_kind() {
        let store = MemoryStore::new();
        store.put(&PutRequest::secure("/dev/api/a", "1")).expect("put");
        let stored = store.stored("/dev/api/a").expect("stored");
        assert_eq!(stored.kind, ParameterKind::SecureString);
    }

    #[test]
    fn rejected_put_leaves_store_untouched() {
        let store = MemoryStore::new();
        assert!(store.put(&PutRequest::secure("no-leading-slash", "1")).is_err());
        assert!(store.is_empty());
    }
}
