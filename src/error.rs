//! # Error Handling
//!
//! This module defines the centralized error type for the `gotter` library.
//! It uses `thiserror` to describe every failure mode of the reference
//! normalizer, the path resolver, the link state machine, the remote rewriter
//! and the external commands they drive.
//!
//! The link-related variants (`AlreadyLinked`, `PathOccupied`) are
//! recoverable: the caller can re-run with `--update` or `--force`. All the
//! others are fatal to the command that produced them.
//!
//! The `Result` alias is used throughout the library. The binary wraps these
//! errors with `anyhow` and turns the first one into the process exit status.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Main error type for gotter operations
#[derive(Error, Debug)]
pub enum Error {
    /// A symlink already exists at the workspace path and neither `update`
    /// nor `force` was requested.
    #[error("Link already exists: {} -> {}\n  hint: use --update or --force to replace it", path.display(), target.as_ref().map(|t| t.display().to_string()).unwrap_or_else(|| "?".to_string()))]
    AlreadyLinked {
        path: PathBuf,
        /// Best-effort target of the existing link
        target: Option<PathBuf>,
    },

    /// A regular file or directory blocks link creation and `force` was not
    /// requested.
    #[error("File/Folder already exists at {}\n  hint: use --force to replace it (irreversible)", path.display())]
    PathOccupied { path: PathBuf },

    /// The remote listing had no `origin <url> (push)` line.
    #[error("Couldn't parse git remote origin url")]
    NoOriginFound,

    /// The reference could not be turned into a canonical path.
    #[error("Invalid repository reference '{reference}': {message}")]
    InvalidReference { reference: String, message: String },

    /// The canonical path names a host but no repository under it.
    #[error("Repository reference '{reference}' has no repository path")]
    MissingRepositoryPath { reference: String },

    /// `new` was asked to create a project whose root directory already exists.
    #[error("Project folder already exists at {}", path.display())]
    ProjectExists { path: PathBuf },

    /// An external command could not be started at all.
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// An external command exited unsuccessfully.
    #[error("Command `{command}` failed ({status}){}", if stderr.is_empty() { String::new() } else { format!(": {}", stderr.trim_end()) })]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// Configuration is missing or inconsistent.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`crate::config::FileConfig`].
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] toml::de::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
