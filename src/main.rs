//! paramstore-config: import and inspect tiered service configuration
//!
//! Imports JSON documents into a parameter store under
//! `/<environment>/<service>/<key>` and shows the merged configuration a
//! service would see at start-up.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
