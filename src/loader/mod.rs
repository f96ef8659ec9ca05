//! Tiered configuration loader
//!
//! Resolves a service's configuration from the parameter store by merging
//! prefix-scoped tiers, lowest precedence first:
//!
//! - global: `/<environment>/global/`
//! - local (optional, see [`MergePolicy`]): `/local/<user>/`
//! - service: `/<environment>/<service>/`
//!
//! The merged table is held as an immutable [`Snapshot`] that `initialize`
//! replaces wholesale. Lookups never touch the store.

use crate::error::{ConfigError, Result};
use crate::fetch::prefix::validate_segment;
use crate::fetch::{fetch_by_prefix, Prefix};
use crate::store::{ParameterStore, PutRequest};
use crate::utils::encode_value;
use parking_lot::Mutex;
use serde_json::value::RawValue;
use std::collections::BTreeMap;
use std::sync::Arc;

pub mod policy;
pub mod snapshot;
mod typed;

pub use policy::{LocalOverride, LocalPlacement, MergePolicy};
pub use snapshot::Snapshot;

use policy::{process_env, LOCAL_SCOPE};
use snapshot::SnapshotCell;

/// Scope segment shared by every service in an environment.
pub const GLOBAL_SCOPE: &str = "global";

/// Outcome of a successful [`Loader::import`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Keys written, in write order.
    pub written: Vec<String>,
    /// Keys whose JSON value was `null`.
    pub skipped: Vec<String>,
}

pub struct LoaderBuilder<S> {
    environment: String,
    service: String,
    store: S,
    policy: MergePolicy,
}

impl<S: ParameterStore> LoaderBuilder<S> {
    /// Set the local override strategy
    pub fn merge_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Result<Loader<S>> {
        validate_segment(&self.environment)?;
        validate_segment(&self.service)?;

        let service_prefix =
            Prefix::from_segments(&[self.environment.as_str(), self.service.as_str()])?;
        let global_prefix = Prefix::from_segments(&[self.environment.as_str(), GLOBAL_SCOPE])?;

        Ok(Loader {
            environment: self.environment,
            service: self.service,
            service_prefix,
            global_prefix,
            policy: self.policy,
            store: self.store,
            snapshot: SnapshotCell::empty(),
            init_lock: Mutex::new(()),
        })
    }
}

/// Loads and serves configuration for one `(environment, service)` pair.
pub struct Loader<S> {
    environment: String,
    service: String,
    service_prefix: Prefix,
    global_prefix: Prefix,
    policy: MergePolicy,
    store: S,
    snapshot: SnapshotCell,
    init_lock: Mutex<()>,
}

impl<S: ParameterStore> Loader<S> {
    pub fn builder(
        environment: impl Into<String>,
        service: impl Into<String>,
        store: S,
    ) -> LoaderBuilder<S> {
        LoaderBuilder {
            environment: environment.into(),
            service: service.into(),
            store,
            policy: MergePolicy::default(),
        }
    }

    /// Loader with the default merge policy (no local tier).
    pub fn new(
        environment: impl Into<String>,
        service: impl Into<String>,
        store: S,
    ) -> Result<Self> {
        Self::builder(environment, service, store).build()
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn service_prefix(&self) -> &Prefix {
        &self.service_prefix
    }

    pub fn global_prefix(&self) -> &Prefix {
        &self.global_prefix
    }

    pub fn merge_policy(&self) -> &MergePolicy {
        &self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Prefix of the local tier `initialize` would fetch right now, if any.
    pub fn local_prefix(&self) -> Result<Option<Prefix>> {
        self.policy
            .local_user(&self.environment, process_env)
            .map(|user| Prefix::from_segments(&[LOCAL_SCOPE, user.as_str()]))
            .transpose()
    }

    /// Fetch every tier, merge them and replace the snapshot.
    ///
    /// On error the previous snapshot stays in place. Concurrent calls are
    /// serialized.
    pub fn initialize(&self) -> Result<()> {
        let _guard = self.init_lock.lock();

        let global = fetch_by_prefix(&self.store, &self.global_prefix)?;
        tracing::debug!(prefix = %self.global_prefix, keys = global.len(), "fetched global tier");

        let local = match self.local_prefix()? {
            Some(prefix) => {
                let tier = fetch_by_prefix(&self.store, &prefix)?;
                tracing::debug!(prefix = %prefix, keys = tier.len(), "fetched local tier");
                Some(tier)
            }
            None => None,
        };

        let service = fetch_by_prefix(&self.store, &self.service_prefix)?;
        tracing::debug!(
            prefix = %self.service_prefix,
            keys = service.len(),
            "fetched service tier"
        );

        let tiers = match (local, self.policy.placement) {
            (None, _) => vec![global, service],
            (Some(local), LocalPlacement::BetweenGlobalAndService) => vec![global, local, service],
            (Some(local), LocalPlacement::AboveService) => vec![global, service, local],
        };

        let merged = merge_tiers(tiers);
        let keys = merged.len();
        self.snapshot.replace(Snapshot::new(merged));

        tracing::info!(
            environment = %self.environment,
            service = %self.service,
            keys,
            "configuration initialized"
        );
        Ok(())
    }

    /// Current snapshot; stays consistent even if `initialize` runs again.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.load()
    }

    /// Raw value for `key` from the current snapshot.
    pub fn get(&self, key: &str) -> Result<String> {
        self.snapshot
            .load()
            .get(key)
            .map(str::to_string)
            .ok_or_else(|| self.not_found(key))
    }

    /// Write `value` at `/<environment>/<service>/<key>` as an encrypted
    /// parameter, replacing any existing value. The snapshot is not updated.
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        let name = self.service_prefix.join(key);
        self.store.put(&PutRequest::secure(name, value))?;
        Ok(())
    }

    /// Write every field of a flat JSON object under the service prefix.
    ///
    /// Values go through [`encode_value`]; `null` fields are skipped and a
    /// `null` document imports nothing. Keys are written in sorted order and
    /// the first failed write aborts the import without undoing earlier writes.
    pub fn import(&self, data: &[u8]) -> Result<ImportReport> {
        let document: Option<BTreeMap<String, Option<Box<RawValue>>>> =
            serde_json::from_slice(data)
                .map_err(|err| ConfigError::InvalidDocument { reason: err.to_string() })?;

        let mut report = ImportReport::default();
        for (key, raw) in document.unwrap_or_default() {
            let Some(raw) = raw else {
                tracing::debug!(key = %key, "skipping null value");
                report.skipped.push(key);
                continue;
            };

            let value = encode_value(raw.get());
            self.put(&key, &value).map_err(|err| ConfigError::ImportFailed {
                key: key.clone(),
                source: Box::new(err),
            })?;
            report.written.push(key);
        }

        tracing::info!(
            prefix = %self.service_prefix,
            written = report.written.len(),
            skipped = report.skipped.len(),
            "import complete"
        );
        Ok(report)
    }

    fn not_found(&self, key: &str) -> ConfigError {
        ConfigError::NotFound { service: self.service.clone(), key: key.to_string() }
    }
}

/// Merge tiers given lowest precedence first; later tiers win per key.
pub fn merge_tiers<I>(tiers: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = BTreeMap<String, String>>,
{
    let mut merged = BTreeMap::new();
    for tier in tiers {
        merged.extend(tier);
    }
    merged
}
