//! Settings for the command-line tool
//!
//! Resolved with precedence CLI > Env (`PARAMSTORE_*`) > File > Defaults.

pub mod loader;
pub mod merge;
pub mod settings;

pub use loader::load_settings;
pub use merge::{merge_cli_with_settings, CliOverrides};
pub use settings::{LocalOverrideMode, Settings};
