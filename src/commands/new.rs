//! New command implementation
//!
//! Starts a project from scratch: creates `GOPATH/src/<canonical path>`,
//! runs `git init`, adds an SSH `origin`, and links it into the workspace.

use anyhow::Result;
use clap::Args;

use gotter::config::Config;

use super::with_workspace;

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Repository reference for the new project (e.g. github.com/you/project)
    #[arg(value_name = "REFERENCE")]
    pub reference: String,
}

/// Execute the new command
pub fn execute(args: NewArgs, config: &Config) -> Result<()> {
    let locations = with_workspace(config, |workspace| workspace.create(&args.reference))?;
    println!(
        "Created {} -> {}",
        locations.workspace_path.display(),
        locations.root_path.display()
    );
    Ok(())
}
