//! Rm command implementation
//!
//! Removes the workspace link first and the checkout under `GOPATH/src`
//! second. If the link cannot be removed the checkout is left in place.

use anyhow::{Context, Result};
use clap::Args;

use gotter::config::Config;

use super::with_workspace;

/// Arguments for the rm command
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Repository reference (import path, URL, or user@host:path)
    #[arg(value_name = "REFERENCE")]
    pub reference: String,
}

/// Execute the rm command
pub fn execute(args: RmArgs, config: &Config) -> Result<()> {
    with_workspace(config, |workspace| workspace.remove(&args.reference))
        .context("Failed to remove project")
}
