//! Immutable configuration snapshot and its atomically swapped holder

use arc_swap::ArcSwap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Merged `local key -> value` table produced by one `initialize` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    values: BTreeMap<String, String>,
}

impl Snapshot {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.values.clone()
    }
}

/// Readers load a whole snapshot; writers replace it in one step.
#[derive(Debug)]
pub(crate) struct SnapshotCell {
    inner: ArcSwap<Snapshot>,
}

impl SnapshotCell {
    pub(crate) fn empty() -> Self {
        Self { inner: ArcSwap::from_pointee(Snapshot::default()) }
    }

    pub(crate) fn load(&self) -> Arc<Snapshot> {
        self.inner.load_full()
    }

    pub(crate) fn replace(&self, next: Snapshot) -> Arc<Snapshot> {
        self.inner.swap(Arc::new(next))
    }
}
