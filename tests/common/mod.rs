//! Shared test utilities for E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new();
//!     fixture.command().args(["link", "example.org/o/p"]).assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git_available, scripts, TestFixture};
}

/// Stand-ins for `go get`, written into the fixture as a file named `get`.
///
/// The fixture runs the toolchain as `sh`, so `<go> get <args>` becomes
/// `sh get <args>` and the script sees the `go get` arguments as `$@`.
#[allow(dead_code)]
pub mod scripts {
    /// Echo the arguments and create the package directory.
    pub const FETCH: &str = r#"
echo "fake-go get $*"
for last; do :; done
mkdir -p "$GOPATH/src/$last"
"#;

    /// Like `FETCH`, but also make the checkout a git repo with an HTTPS origin.
    pub const FETCH_WITH_GIT: &str = r#"
echo "fake-go get $*"
for last; do :; done
mkdir -p "$GOPATH/src/$last"
cd "$GOPATH/src/$last" && git init -q && git remote add origin "https://$last.git"
"#;

    /// Fail like a fetch of an unknown package.
    pub const FAIL: &str = r#"
echo "fake-go: cannot find package" >&2
exit 1
"#;
}

/// Check whether the `git` binary is available.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// A temporary GOPATH and WORKSPACE pair.
///
/// ```rust,ignore
/// let fixture = TestFixture::new().with_toolchain(scripts::FETCH);
/// fixture.command().args(["clone", "example.org/o/p"]).assert().success();
/// assert!(fixture.root_path("example.org/o/p").is_dir());
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a fixture with empty `go/` and `workspace/` directories.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("go/src")
            .create_dir_all()
            .expect("Failed to create GOPATH");
        temp_dir
            .child("workspace")
            .create_dir_all()
            .expect("Failed to create workspace");
        Self { temp_dir }
    }

    /// Install a fake toolchain script (see [`scripts`]).
    pub fn with_toolchain(self, script: &str) -> Self {
        self.temp_dir
            .child("get")
            .write_str(script)
            .expect("Failed to write toolchain script");
        self
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn gopath(&self) -> PathBuf {
        self.path().join("go")
    }

    pub fn workspace(&self) -> PathBuf {
        self.path().join("workspace")
    }

    /// `GOPATH/src/<canonical>`
    pub fn root_path(&self, canonical: &str) -> PathBuf {
        self.gopath().join("src").join(canonical)
    }

    /// `WORKSPACE/<leaf>`
    pub fn link_path(&self, leaf: &str) -> PathBuf {
        self.workspace().join(leaf)
    }

    /// Create a command running in the fixture directory with GOPATH and
    /// WORKSPACE pointing into it and no user configuration in reach.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gotter");
        cmd.current_dir(self.path())
            .env("GOPATH", self.gopath())
            .env("WORKSPACE", self.workspace())
            .env("GOTTER_GO", "sh")
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("GOTTER_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
