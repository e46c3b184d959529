//! # Repository References
//!
//! Users name a repository in many ways: the bare import path Go uses
//! (`github.com/owner/repo`), an `http(s)://` or `git://` URL, or the
//! SCP-like form git uses for SSH (`git@github.com:owner/repo.git`). This
//! module reduces every one of them to a single [`CanonicalPath`], the
//! scheme-free and suffix-free `host/path` string that doubles as the Go
//! import path and as the directory under `$GOPATH/src`.
//!
//! ```
//! use gotter::reference::normalize;
//!
//! let a = normalize("git@example.org:owner/repo.git").unwrap();
//! let b = normalize("https://example.org/owner/repo").unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.as_str(), "example.org/owner/repo");
//! ```

use std::fmt;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{Error, Result};

const SCHEMES: [&str; 3] = ["http://", "https://", "git://"];

/// A scheme-free, suffix-free `host/path` naming one repository.
///
/// Two references that denote the same repository always normalize to equal
/// canonical paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalPath(String);

impl CanonicalPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The host part, including an explicit port if one survived
    /// normalization.
    pub fn host(&self) -> &str {
        match self.0.split_once('/') {
            Some((host, _)) => host,
            None => &self.0,
        }
    }

    /// The path below the host, if any.
    pub fn repo_path(&self) -> Option<&str> {
        self.0
            .split_once('/')
            .map(|(_, path)| path)
            .filter(|path| !path.is_empty())
    }

    /// The last `/`-separated segment; names the workspace link.
    pub fn leaf(&self) -> &str {
        match self.0.rfind('/') {
            Some(index) => &self.0[index + 1..],
            None => &self.0,
        }
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How a reference was written, judged by its prefix alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// A bare import path such as `github.com/owner/repo`
    GoPackage,
    Http,
    Https,
    /// `git://` protocol
    Git,
    /// SCP-like `user@host:path`
    Ssh,
}

impl ReferenceKind {
    pub fn is_ssh(self) -> bool {
        self == ReferenceKind::Ssh
    }
}

/// Classify a reference without normalizing it.
pub fn classify(reference: &str) -> ReferenceKind {
    if reference.starts_with("http://") {
        ReferenceKind::Http
    } else if reference.starts_with("https://") {
        ReferenceKind::Https
    } else if reference.starts_with("git://") {
        ReferenceKind::Git
    } else if reference.contains('@') {
        ReferenceKind::Ssh
    } else {
        ReferenceKind::GoPackage
    }
}

/// Reduce any accepted reference form to its canonical `host/path`.
///
/// A trailing `.git` is dropped, a missing scheme is treated as `http://`,
/// and the last colon that is not part of the scheme separator is read as
/// the SCP path separator. Userinfo never reaches the result. A reference
/// with no path yields the host alone; rejecting it is up to the caller.
///
/// The host, any explicit port and the path are kept as written whatever
/// the scheme: no case folding, no default-port elision, no dot-segment
/// resolution. Percent escapes in the path are decoded and a query or
/// fragment is dropped.
pub fn normalize(reference: &str) -> Result<CanonicalPath> {
    let stripped = reference.strip_suffix(".git").unwrap_or(reference);

    let mut candidate = if SCHEMES.iter().any(|scheme| stripped.starts_with(scheme)) {
        stripped.to_string()
    } else {
        format!("http://{}", stripped)
    };

    let scheme_sep = candidate.find("://");
    if let Some(index) = candidate.rfind(':') {
        if Some(index) != scheme_sep && index > 0 {
            candidate.replace_range(index..=index, "/");
        }
    }

    let invalid = |message: &str| Error::InvalidReference {
        reference: reference.to_string(),
        message: message.to_string(),
    };

    // The url crate only validates here; it normalizes special schemes
    // differently from opaque ones, so the parts are sliced from the text.
    Url::parse(&candidate).map_err(|e| invalid(&e.to_string()))?;

    let rest = candidate
        .split_once("://")
        .map(|(_, rest)| rest)
        .ok_or_else(|| invalid("missing scheme"))?;
    let (authority, path) = match rest.find(['/', '?', '#']) {
        Some(index) => rest.split_at(index),
        None => (rest, ""),
    };
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    if host.is_empty() || host.starts_with(':') {
        return Err(invalid("no host"));
    }

    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = percent_decode_str(path)
        .decode_utf8()
        .map_err(|e| invalid(&e.to_string()))?;

    let mut canonical = host.to_string();
    canonical.push_str(path.trim_end_matches('/'));
    Ok(CanonicalPath(canonical))
}
