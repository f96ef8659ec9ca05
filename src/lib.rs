//! paramstore-config: hierarchical service configuration from a parameter store
//!
//! Parameters live in a path-namespaced store under
//! `/<environment>/<service>/<key>` and `/<environment>/global/<key>`. A
//! [`Loader`] fetches those tiers (plus an optional per-user tier), merges
//! them with service values taking precedence, and serves typed lookups from
//! an in-memory snapshot.

pub mod config;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod store;
pub mod utils;

pub use error::{ConfigError, Result};
pub use fetch::{fetch_by_prefix, Prefix};
pub use loader::{
    ImportReport, LocalOverride, LocalPlacement, Loader, LoaderBuilder, MergePolicy, Snapshot,
};
pub use store::{FileStore, MemoryStore, ParameterStore, StoreError};
