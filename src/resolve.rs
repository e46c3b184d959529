//! Derive filesystem locations and the SSH remote URL for a canonical path.
//!
//! Everything here is a pure function of its inputs: no filesystem access
//! beyond reading the current directory to absolutize relative paths.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::reference::CanonicalPath;

/// Default user for SSH remotes.
pub const DEFAULT_SSH_USER: &str = "git";

/// Where a repository lives on disk and how to push to it over SSH.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocations {
    pub canonical: CanonicalPath,
    /// `<root>/src/<canonical>`
    pub root_path: PathBuf,
    /// `<workspace>/<leaf>`
    pub workspace_path: PathBuf,
    /// `user@host:owner/repo.git`
    pub ssh_url: String,
}

/// Resolve a canonical path against the toolchain root and the workspace.
///
/// Fails with [`Error::MissingRepositoryPath`] when the canonical path is a
/// bare host, since there is no leaf to name the link after.
pub fn resolve(
    canonical: &CanonicalPath,
    ssh_user: &str,
    root_dir: &Path,
    workspace_dir: &Path,
) -> Result<ResolvedLocations> {
    let ssh_url = ssh_url(canonical, ssh_user)?;
    let root_path = absolute(&root_dir.join("src").join(canonical.as_str()));
    let workspace_path = absolute(&workspace_dir.join(canonical.leaf()));

    Ok(ResolvedLocations {
        canonical: canonical.clone(),
        root_path,
        workspace_path,
        ssh_url,
    })
}

/// Build the SSH remote URL for a canonical path.
///
/// Only the first two path segments are kept, which is the `owner/repo`
/// depth hosting services accept for SSH remotes.
pub fn ssh_url(canonical: &CanonicalPath, user: &str) -> Result<String> {
    let repo_path = canonical
        .repo_path()
        .ok_or_else(|| Error::MissingRepositoryPath {
            reference: canonical.to_string(),
        })?;
    let segments: Vec<&str> = repo_path.split('/').take(2).collect();
    Ok(format!(
        "{}@{}:{}.git",
        user,
        canonical.host(),
        segments.join("/")
    ))
}

/// Expand a leading `~` and make the path absolute.
///
/// Falls back to the expanded path unchanged if the current directory cannot
/// be read.
pub fn absolute(path: &Path) -> PathBuf {
    let expanded = match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    };
    std::path::absolute(&expanded).unwrap_or(expanded)
}
