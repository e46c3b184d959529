//! # Workspace Links
//!
//! The workspace holds one symlink per project, named after the project's
//! leaf segment and pointing into `$GOPATH/src`. This module decides what to
//! do with whatever currently sits at the link path and performs it.
//!
//! | on disk           | update | force | outcome                      |
//! |-------------------|--------|-------|------------------------------|
//! | nothing           | any    | any   | link created                 |
//! | symlink           | no     | no    | [`Error::AlreadyLinked`]     |
//! | symlink           | yes    | any   | link replaced                |
//! | symlink           | any    | yes   | link replaced                |
//! | file or directory | any    | no    | [`Error::PathOccupied`]      |
//! | file or directory | any    | yes   | entry removed, link created  |
//!
//! Only `force` ever deletes something that is not a symlink.
//!
//! Replacing a symlink or a regular file is atomic: the new link is staged
//! under a hidden sibling name and renamed over the old entry. A directory
//! cannot be renamed over, so it is removed first and the link created
//! afterwards; a failure between the two leaves the path empty. The state is
//! inspected once per call and nothing coordinates concurrent invocations, so
//! two processes linking the same path can race between the inspection and
//! the mutation.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};

/// What the caller allows [`ensure_link`] to replace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkOptions {
    /// Replace an existing symlink.
    pub update: bool,
    /// Replace an existing symlink, file or directory.
    pub force: bool,
}

/// What currently occupies a workspace path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    Absent,
    /// A symlink, dangling or not. The target is best-effort.
    Symlink { target: Option<PathBuf> },
    /// A regular file, directory, or anything else that is not a symlink.
    Occupied { is_dir: bool },
}

impl LinkState {
    /// Whether this is a symlink pointing exactly at `root_path`.
    pub fn points_to(&self, root_path: &Path) -> bool {
        matches!(self, LinkState::Symlink { target: Some(target) } if target == root_path)
    }
}

/// Read the current state of `path` without following symlinks.
pub fn inspect(path: &Path) -> Result<LinkState> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => Ok(LinkState::Symlink {
            target: fs::read_link(path).ok(),
        }),
        Ok(metadata) => Ok(LinkState::Occupied {
            is_dir: metadata.is_dir(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(LinkState::Absent),
        Err(e) => Err(e.into()),
    }
}

/// Make `workspace_path` a symlink to `root_path`, within what `options`
/// allows.
pub fn ensure_link(root_path: &Path, workspace_path: &Path, options: LinkOptions) -> Result<()> {
    match inspect(workspace_path)? {
        LinkState::Absent => create_symlink(root_path, workspace_path)?,
        LinkState::Symlink { target } if options.update || options.force => {
            debug!(
                " ----> replacing link {} (was -> {})",
                workspace_path.display(),
                display_target(target.as_deref())
            );
            replace_with_symlink(root_path, workspace_path)?;
        }
        LinkState::Symlink { target } => {
            warn!("Link already exists!");
            warn!(
                " ----> {} -> {}",
                workspace_path.display(),
                display_target(target.as_deref())
            );
            return Err(Error::AlreadyLinked {
                path: workspace_path.to_path_buf(),
                target,
            });
        }
        LinkState::Occupied { is_dir } if options.force => {
            warn!(" ----> removing {}", workspace_path.display());
            if is_dir {
                fs::remove_dir_all(workspace_path)?;
                create_symlink(root_path, workspace_path)?;
            } else {
                replace_with_symlink(root_path, workspace_path)?;
            }
        }
        LinkState::Occupied { .. } => {
            return Err(Error::PathOccupied {
                path: workspace_path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Remove whatever is at `workspace_path` the way `rm` would: symlinks and
/// files go, a real directory is refused by the OS.
pub fn remove_link(workspace_path: &Path) -> Result<()> {
    fs::remove_file(workspace_path)?;
    Ok(())
}

/// Remove the workspace link, then the project directory under the root.
///
/// If the link cannot be removed the directory is left alone. A root
/// directory that is already gone is not an error.
pub fn remove_project(root_path: &Path, workspace_path: &Path) -> Result<()> {
    remove_link(workspace_path)?;
    match fs::remove_dir_all(root_path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

fn display_target(target: Option<&Path>) -> String {
    target
        .map(|t| t.display().to_string())
        .unwrap_or_else(|| "?".to_string())
}

fn staging_path(workspace_path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(workspace_path.file_name().unwrap_or_default());
    name.push(".gotter-link");
    workspace_path.with_file_name(name)
}

fn replace_with_symlink(root_path: &Path, workspace_path: &Path) -> Result<()> {
    let staging = staging_path(workspace_path);
    // Left behind by an interrupted run.
    if let Err(e) = fs::remove_file(&staging) {
        if e.kind() != io::ErrorKind::NotFound {
            return Err(e.into());
        }
    }
    create_symlink(root_path, &staging)?;
    if let Err(e) = fs::rename(&staging, workspace_path) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(unix)]
fn create_symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

#[cfg(windows)]
fn create_symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(original, link)
}
