//! Update-remote command implementation

use anyhow::Result;
use clap::Args;

use gotter::config::Config;

use super::with_workspace;

/// Arguments for the update-remote command
#[derive(Args, Debug)]
pub struct UpdateRemoteArgs {
    /// Repository reference (import path, URL, or user@host:path)
    #[arg(value_name = "REFERENCE")]
    pub reference: String,

    /// User for the SSH url [default: git]
    #[arg(long, value_name = "USER")]
    pub ssh_user: Option<String>,
}

/// Execute the update-remote command
pub fn execute(args: UpdateRemoteArgs, config: &Config) -> Result<()> {
    let rewrite = with_workspace(config, |workspace| {
        workspace.update_remote(&args.reference, args.ssh_user.as_deref())
    })?;
    log::info!("origin: {} -> {}", rewrite.current_url, rewrite.ssh_url);
    Ok(())
}
