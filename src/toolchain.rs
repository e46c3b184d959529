//! Fetching packages with the Go toolchain.

use std::io;

use log::debug;

use crate::error::Result;
use crate::process::{describe, run_streaming};
use crate::reference::CanonicalPath;

/// Modifiers for a package fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Update code that is already present (`-u`).
    pub update: bool,
    /// Download only, don't build or install (`-d`).
    pub download_only: bool,
}

/// Something that can materialize a package under the toolchain root.
pub trait Toolchain {
    fn fetch(&self, package: &CanonicalPath, options: FetchOptions) -> Result<()>;
}

/// `go get`, with its output streamed to our stdout.
#[derive(Debug, Clone)]
pub struct GoTool {
    program: String,
}

impl GoTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GoTool {
    fn default() -> Self {
        Self::new("go")
    }
}

/// Arguments for `go get`, flags before the package path.
pub fn get_args(package: &CanonicalPath, options: FetchOptions) -> Vec<&str> {
    let mut args = vec!["get"];
    if options.update {
        args.push("-u");
    }
    if options.download_only {
        args.push("-d");
    }
    args.push(package.as_str());
    args
}

impl Toolchain for GoTool {
    fn fetch(&self, package: &CanonicalPath, options: FetchOptions) -> Result<()> {
        let args = get_args(package, options);
        debug!(" ----> running {}", describe(&self.program, &args));
        run_streaming(&self.program, &args, None, &mut io::stdout())?;
        debug!(" ----> Successfully got package!");
        Ok(())
    }
}
