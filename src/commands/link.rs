//! Link command implementation
//!
//! `gotter link <reference>` creates `WORKSPACE/<leaf>` pointing at
//! `GOPATH/src/<canonical path>`; `gotter link rm <reference>` removes it.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use gotter::config::Config;
use gotter::link::LinkOptions;

use super::with_workspace;

/// Arguments for the link command
#[derive(Args, Debug)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct LinkArgs {
    #[command(subcommand)]
    pub command: Option<LinkSubcommand>,

    /// Repository reference (import path, URL, or user@host:path)
    #[arg(value_name = "REFERENCE", required = true)]
    pub reference: Option<String>,

    /// Update an existing link
    #[arg(short, long)]
    pub update: bool,

    /// Replace whatever is at the link path, even files and folders (irreversible)
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Subcommand, Debug)]
pub enum LinkSubcommand {
    /// Remove the workspace link
    Rm(RmLinkArgs),
}

/// Arguments for the link rm command
#[derive(Args, Debug)]
pub struct RmLinkArgs {
    /// Repository reference (import path, URL, or user@host:path)
    #[arg(value_name = "REFERENCE")]
    pub reference: String,
}

impl LinkArgs {
    pub fn link_options(&self) -> LinkOptions {
        LinkOptions {
            update: self.update,
            force: self.force,
        }
    }
}

/// Execute the link command
pub fn execute(args: LinkArgs, config: &Config) -> Result<()> {
    if let Some(LinkSubcommand::Rm(rm)) = &args.command {
        return with_workspace(config, |workspace| workspace.unlink(&rm.reference))
            .context("Failed to remove workspace link");
    }

    let reference = args
        .reference
        .as_deref()
        .context("a repository reference is required")?;
    with_workspace(config, |workspace| {
        workspace.link(reference, args.link_options())
    })?;
    Ok(())
}
