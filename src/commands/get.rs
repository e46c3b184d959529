//! Get command implementation
//!
//! The everyday command: fetch with the Go toolchain, link into the
//! workspace, then switch `origin` to SSH. Stops at the first step that
//! fails.

use anyhow::Result;
use clap::Args;

use gotter::config::Config;
use gotter::link::LinkOptions;
use gotter::project::GetOptions;
use gotter::toolchain::FetchOptions;

use super::with_workspace;

/// Arguments for the get command
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Repository reference (import path, URL, or user@host:path)
    #[arg(value_name = "REFERENCE")]
    pub reference: String,

    /// Update existing code and an existing link
    #[arg(short, long)]
    pub update: bool,

    /// Only download the code, don't install with the go toolchain
    #[arg(short, long)]
    pub download_only: bool,

    /// Force updating and linking (irreversible)
    #[arg(short, long)]
    pub force: bool,

    /// Do not update the remote origin to use SSH
    #[arg(long)]
    pub no_ssh: bool,

    /// User for the SSH url [default: git]
    #[arg(long, value_name = "USER")]
    pub ssh_user: Option<String>,
}

impl GetArgs {
    pub fn get_options(&self) -> GetOptions {
        GetOptions {
            fetch: FetchOptions {
                update: self.update,
                download_only: self.download_only,
            },
            link: LinkOptions {
                update: self.update,
                force: self.force,
            },
            no_ssh: self.no_ssh,
            ssh_user: self.ssh_user.clone(),
        }
    }
}

/// Execute the get command
pub fn execute(args: GetArgs, config: &Config) -> Result<()> {
    let options = args.get_options();
    with_workspace(config, |workspace| workspace.get(&args.reference, &options))?;
    Ok(())
}
