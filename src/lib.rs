//! # gotter
//!
//! Keep Go projects where the toolchain wants them (`$GOPATH/src/<import
//! path>`) and still reach them from one flat workspace directory of your
//! choosing. Each project gets a symlink `$WORKSPACE/<leaf>` pointing at its
//! checkout.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use gotter::reference::normalize;
//! use gotter::resolve::resolve;
//!
//! let canonical = normalize("git@github.com:owner/repo.git").unwrap();
//! let locations = resolve(&canonical, "git", Path::new("/go"), Path::new("/code")).unwrap();
//!
//! assert_eq!(canonical.as_str(), "github.com/owner/repo");
//! assert_eq!(locations.workspace_path, Path::new("/code/repo"));
//! assert_eq!(locations.ssh_url, "git@github.com:owner/repo.git");
//! ```
//!
//! ## Core Concepts
//!
//! - **References (`reference`)**: any accepted spelling of a repository
//!   reduced to a canonical `host/path`.
//! - **Resolution (`resolve`)**: the checkout path, the workspace link path
//!   and the SSH remote URL for a canonical path.
//! - **Links (`link`)**: the create/replace/refuse rules for the workspace
//!   symlink.
//! - **Remotes (`remote`)**: reading `git remote -v` and deriving the SSH
//!   `origin` URL.
//! - **Collaborators (`process`, `git`, `toolchain`)**: the external `go`
//!   and `git` commands.
//! - **Projects (`project`)**: the command-level flows built from the above.
//!
//! Nothing in the library reads the environment; the binary builds a
//! [`config::Config`] once and hands it down.

pub mod config;
pub mod error;
pub mod git;
pub mod link;
pub mod output;
pub mod process;
pub mod project;
pub mod reference;
pub mod remote;
pub mod resolve;
pub mod toolchain;

#[cfg(test)]
mod reference_proptest;
