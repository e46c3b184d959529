//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `gotter`
//! command-line tool, one file per command.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and the resolved
//!   [`Config`] and calls into the `gotter` library to do the work.

pub mod clone;
pub mod completions;
pub mod get;
pub mod link;
pub mod new;
pub mod rm;
pub mod update_remote;

use gotter::config::Config;
use gotter::error::Result;
use gotter::git::Git;
use gotter::project::Workspace;
use gotter::toolchain::GoTool;

/// Run `f` against a workspace backed by the real `go` and `git` commands.
pub fn with_workspace<T>(config: &Config, f: impl FnOnce(&Workspace<'_>) -> Result<T>) -> Result<T> {
    let go = GoTool::new(config.go_bin.as_str());
    let git = Git::new(config.git_bin.as_str());
    f(&Workspace::new(config, &go, &git))
}
