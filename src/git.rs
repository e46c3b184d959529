//! Running git against a checkout.
//!
//! Only the handful of commands needed to create a repository and manage its
//! `origin` remote. Each runs with the repository as its working directory.

use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::process::{describe, run_capture};

/// The git operations a project needs. Every call is scoped to the
/// repository directory `dir`.
///
/// Implemented by [`Git`] for real use; tests substitute recorders.
pub trait SourceControl {
    /// `git init`
    fn init(&self, dir: &Path) -> Result<()>;

    /// `git remote add origin <url>`
    fn add_origin(&self, dir: &Path, url: &str) -> Result<()>;

    /// `git remote -v`, captured
    fn list_remotes(&self, dir: &Path) -> Result<String>;

    /// `git remote set-url origin <url>`
    fn set_origin_url(&self, dir: &Path, url: &str) -> Result<()>;
}

/// The system `git` command.
///
/// Authentication (SSH keys, credential helpers) is whatever the user's git
/// is configured with.
#[derive(Debug, Clone)]
pub struct Git {
    program: String,
}

impl Git {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, dir: &Path, args: &[&str]) -> Result<String> {
        debug!(" ----> running: {}", describe(&self.program, args));
        run_capture(&self.program, args, Some(dir))
    }
}

impl Default for Git {
    fn default() -> Self {
        Self::new("git")
    }
}

impl SourceControl for Git {
    fn init(&self, dir: &Path) -> Result<()> {
        self.run(dir, &["init"]).map(drop)
    }

    fn add_origin(&self, dir: &Path, url: &str) -> Result<()> {
        self.run(dir, &["remote", "add", "origin", url]).map(drop)
    }

    fn list_remotes(&self, dir: &Path) -> Result<String> {
        self.run(dir, &["remote", "-v"])
    }

    fn set_origin_url(&self, dir: &Path, url: &str) -> Result<()> {
        self.run(dir, &["remote", "set-url", "origin", url])
            .map(drop)
    }
}
