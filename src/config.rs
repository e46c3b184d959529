//! # Configuration
//!
//! gotter needs two directories to do anything: the Go root (`GOPATH`), whose
//! `src/` tree holds the real checkouts, and the workspace (`WORKSPACE`), the
//! flat directory of symlinks. Both are normally taken from the environment
//! through the CLI's `env` bindings, with an optional TOML file as a fallback:
//!
//! ```toml
//! # ~/.config/gotter/config.toml
//! gopath = "~/go"
//! workspace = "~/code"
//! ssh_user = "git"
//! go = "go"
//! git = "git"
//! ```
//!
//! Values given on the command line or in the environment always win over
//! the file. The resulting [`Config`] is built once at startup and passed to
//! everything that needs it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::reference::normalize;
use crate::resolve::{resolve, ResolvedLocations, DEFAULT_SSH_USER};

/// Contents of the optional configuration file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Go root; a `GOPATH`-style list is allowed, its first entry is used.
    pub gopath: Option<String>,
    pub workspace: Option<PathBuf>,
    pub ssh_user: Option<String>,
    /// Go toolchain binary
    pub go: Option<String>,
    /// git binary
    pub git: Option<String>,
}

impl FileConfig {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration file that must exist.
    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Load a configuration file if it exists.
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Returns the default configuration file location.
///
/// - Linux: `~/.config/gotter/config.toml`
/// - macOS: `~/Library/Application Support/gotter/config.toml`
/// - Windows: `{FOLDERID_RoamingAppData}\gotter\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gotter").join("config.toml"))
}

/// Values that take precedence over the file, usually from flags or the
/// environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub gopath: Option<String>,
    pub workspace: Option<PathBuf>,
    pub ssh_user: Option<String>,
    pub go: Option<String>,
    pub git: Option<String>,
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Go root; checkouts live under `<root_dir>/src`.
    pub root_dir: PathBuf,
    /// Directory holding one symlink per project.
    pub workspace_dir: PathBuf,
    /// User for SSH remotes, `git` unless configured.
    pub ssh_user: String,
    pub go_bin: String,
    pub git_bin: String,
}

impl Config {
    /// Layer `overrides` over `file`. Fails if either directory ends up
    /// unset or empty.
    pub fn build(overrides: Overrides, file: FileConfig) -> Result<Self> {
        let root_dir = overrides
            .gopath
            .or(file.gopath)
            .as_deref()
            .and_then(first_path_entry)
            .ok_or_else(|| Error::Config {
                message: "GOPATH environment variable not set!".to_string(),
            })?;

        let workspace_dir = overrides
            .workspace
            .or(file.workspace)
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or_else(|| Error::Config {
                message: "WORKSPACE environment variable not set!".to_string(),
            })?;

        Ok(Self {
            root_dir,
            workspace_dir,
            ssh_user: overrides
                .ssh_user
                .or(file.ssh_user)
                .unwrap_or_else(|| DEFAULT_SSH_USER.to_string()),
            go_bin: overrides.go.or(file.go).unwrap_or_else(|| "go".to_string()),
            git_bin: overrides
                .git
                .or(file.git)
                .unwrap_or_else(|| "git".to_string()),
        })
    }

    /// Normalize `reference` and resolve it with the configured SSH user.
    pub fn locate(&self, reference: &str) -> Result<ResolvedLocations> {
        self.locate_as(reference, &self.ssh_user)
    }

    /// Normalize `reference` and resolve it with an explicit SSH user.
    pub fn locate_as(&self, reference: &str, ssh_user: &str) -> Result<ResolvedLocations> {
        let canonical = normalize(reference)?;
        resolve(&canonical, ssh_user, &self.root_dir, &self.workspace_dir)
    }
}

/// First non-empty entry of a `GOPATH`-style list.
fn first_path_entry(list: &str) -> Option<PathBuf> {
    std::env::split_paths(list).find(|entry| !entry.as_os_str().is_empty())
}
