//! Clone command implementation
//!
//! Runs `go get` for the canonical import path of a reference, streaming the
//! toolchain's output.

use anyhow::Result;
use clap::Args;

use gotter::config::Config;
use gotter::toolchain::FetchOptions;

use super::with_workspace;

/// Arguments for the clone command
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Repository reference (import path, URL, or user@host:path)
    #[arg(value_name = "REFERENCE")]
    pub reference: String,

    /// Update existing code
    #[arg(short, long)]
    pub update: bool,

    /// Only download the code, don't install with the go toolchain
    #[arg(short, long)]
    pub download_only: bool,
}

impl CloneArgs {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            update: self.update,
            download_only: self.download_only,
        }
    }
}

/// Execute the clone command
pub fn execute(args: CloneArgs, config: &Config) -> Result<()> {
    with_workspace(config, |workspace| {
        workspace.fetch(&args.reference, args.fetch_options())
    })?;
    Ok(())
}
