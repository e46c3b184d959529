//! Rewrite a repository's `origin` remote to its SSH form.
//!
//! The input is the text printed by `git remote -v`:
//!
//! ```text
//! origin	https://github.com/owner/repo (fetch)
//! origin	https://github.com/owner/repo (push)
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::reference::{classify, normalize, CanonicalPath, ReferenceKind};
use crate::resolve::ssh_url;

/// The current `origin` push URL and the SSH URL that should replace it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRewrite {
    pub current_url: String,
    pub current_kind: ReferenceKind,
    pub canonical: CanonicalPath,
    pub ssh_url: String,
}

impl RemoteRewrite {
    /// Whether `origin` already pushes to the SSH URL.
    pub fn is_current(&self) -> bool {
        self.current_kind.is_ssh() && self.current_url == self.ssh_url
    }
}

fn origin_push_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*origin\s+(\S+)\s+\(push\)").expect("origin push pattern is valid")
    })
}

/// Extract the `origin` push URL; the last matching line wins.
pub fn parse_origin_push_url(listing: &str) -> Result<String> {
    listing
        .lines()
        .filter_map(|line| origin_push_line().captures(line))
        .filter_map(|captures| captures.get(1))
        .map(|url| url.as_str().to_string())
        .last()
        .ok_or(Error::NoOriginFound)
}

/// Derive the SSH URL that should replace the current `origin` push URL.
pub fn rewrite_origin_to_ssh(listing: &str, ssh_user: &str) -> Result<RemoteRewrite> {
    let current_url = parse_origin_push_url(listing)?;
    let canonical = normalize(&current_url)?;
    let ssh_url = ssh_url(&canonical, ssh_user)?;
    Ok(RemoteRewrite {
        current_kind: classify(&current_url),
        current_url,
        canonical,
        ssh_url,
    })
}
