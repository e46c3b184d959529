//! # Project Operations
//!
//! The operations behind each CLI command, expressed over the
//! [`Toolchain`] and [`SourceControl`] traits so the composite flows can be
//! exercised without `go` or `git`.
//!
//! Composite operations (`get`, `new`) stop at the first failing step and
//! return that step's error unchanged.

use std::fs;

use log::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::git::SourceControl;
use crate::link::{ensure_link, remove_link, remove_project, LinkOptions};
use crate::reference::CanonicalPath;
use crate::remote::{rewrite_origin_to_ssh, RemoteRewrite};
use crate::resolve::ResolvedLocations;
use crate::toolchain::{FetchOptions, Toolchain};

/// Everything `get` may do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOptions {
    pub fetch: FetchOptions,
    pub link: LinkOptions,
    /// Leave the origin remote as the toolchain cloned it.
    pub no_ssh: bool,
    /// SSH user, falling back to the configured one.
    pub ssh_user: Option<String>,
}

/// Projects under one Go root and one workspace.
pub struct Workspace<'a> {
    config: &'a Config,
    toolchain: &'a dyn Toolchain,
    git: &'a dyn SourceControl,
}

impl<'a> Workspace<'a> {
    pub fn new(
        config: &'a Config,
        toolchain: &'a dyn Toolchain,
        git: &'a dyn SourceControl,
    ) -> Self {
        Self {
            config,
            toolchain,
            git,
        }
    }

    /// Fetch the package into the Go root.
    pub fn fetch(&self, reference: &str, options: FetchOptions) -> Result<CanonicalPath> {
        let locations = self.config.locate(reference)?;
        info!("Getting package: {}", locations.canonical);
        self.toolchain.fetch(&locations.canonical, options)?;
        Ok(locations.canonical)
    }

    /// Link the package's checkout into the workspace.
    pub fn link(&self, reference: &str, options: LinkOptions) -> Result<ResolvedLocations> {
        let locations = self.config.locate(reference)?;
        info!(
            "Linking package {} to {}",
            locations.canonical,
            locations.workspace_path.display()
        );
        ensure_link(&locations.root_path, &locations.workspace_path, options)?;
        debug!(" ----> Successfully linked!");
        Ok(locations)
    }

    /// Remove the workspace link, leaving the checkout alone.
    pub fn unlink(&self, reference: &str) -> Result<()> {
        let locations = self.config.locate(reference)?;
        info!("Removing workspace link");
        debug!(" ----> removing {}", locations.workspace_path.display());
        remove_link(&locations.workspace_path)?;
        debug!(" ----> successfully removed workspace link");
        Ok(())
    }

    /// Point the checkout's `origin` at its SSH URL.
    ///
    /// Nothing is changed if no `origin` push URL can be read, or if it
    /// already equals the SSH URL.
    pub fn update_remote(&self, reference: &str, ssh_user: Option<&str>) -> Result<RemoteRewrite> {
        let ssh_user = ssh_user.unwrap_or(self.config.ssh_user.as_str());
        let locations = self.config.locate_as(reference, ssh_user)?;
        info!(
            "Update remote origin URL for repo: {}",
            locations.canonical
        );

        let listing = self.git.list_remotes(&locations.root_path)?;
        let rewrite = rewrite_origin_to_ssh(&listing, ssh_user)?;
        if rewrite.is_current() {
            info!(" ----> origin already uses {}", rewrite.ssh_url);
            return Ok(rewrite);
        }

        self.git
            .set_origin_url(&locations.root_path, &rewrite.ssh_url)?;
        debug!(" ----> Successfully updated remote origin");
        Ok(rewrite)
    }

    /// Fetch, link, then switch `origin` to SSH unless told not to.
    pub fn get(&self, reference: &str, options: &GetOptions) -> Result<ResolvedLocations> {
        self.fetch(reference, options.fetch)?;
        let locations = self.link(reference, options.link)?;
        if !options.no_ssh {
            self.update_remote(reference, options.ssh_user.as_deref())?;
        }
        Ok(locations)
    }

    /// Remove the workspace link and then the checkout itself.
    pub fn remove(&self, reference: &str) -> Result<()> {
        let locations = self.config.locate(reference)?;
        info!("Removing project {}", locations.canonical);
        remove_project(&locations.root_path, &locations.workspace_path)?;
        debug!(" ----> successfully removed project folder");
        Ok(())
    }

    /// Start a new project: create the checkout directory, initialize git
    /// with an SSH `origin`, and link it into the workspace.
    pub fn create(&self, reference: &str) -> Result<ResolvedLocations> {
        let locations = self.config.locate(reference)?;
        info!("Creating new project {}", locations.canonical);

        if fs::symlink_metadata(&locations.root_path).is_ok() {
            return Err(Error::ProjectExists {
                path: locations.root_path,
            });
        }
        fs::create_dir_all(&locations.root_path)?;
        debug!(" ----> successfully created project folder");

        info!("Initializing git repo");
        self.git.init(&locations.root_path)?;

        info!("Adding remote origin");
        self.git
            .add_origin(&locations.root_path, &locations.ssh_url)?;

        ensure_link(
            &locations.root_path,
            &locations.workspace_path,
            LinkOptions::default(),
        )?;
        debug!(" ----> successfully created new project {}", locations.canonical);
        Ok(locations)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::{FileConfig, Overrides};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Pretends to be `go get`: records the call and creates the checkout.
    struct FakeToolchain {
        root_dir: PathBuf,
        fail: bool,
        calls: RefCell<Vec<(String, FetchOptions)>>,
    }

    impl Toolchain for FakeToolchain {
        fn fetch(&self, package: &CanonicalPath, options: FetchOptions) -> Result<()> {
            self.calls
                .borrow_mut()
                .push((package.to_string(), options));
            if self.fail {
                return Err(Error::Io(std::io::Error::other("fetch failed")));
            }
            fs::create_dir_all(self.root_dir.join("src").join(package.as_str()))?;
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeGit {
        listing: String,
        calls: RefCell<Vec<String>>,
    }

    impl SourceControl for FakeGit {
        fn init(&self, dir: &Path) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(format!("init {}", dir.display()));
            Ok(())
        }

        fn add_origin(&self, _dir: &Path, url: &str) -> Result<()> {
            self.calls.borrow_mut().push(format!("add-origin {}", url));
            Ok(())
        }

        fn list_remotes(&self, _dir: &Path) -> Result<String> {
            self.calls.borrow_mut().push("list-remotes".to_string());
            Ok(self.listing.clone())
        }

        fn set_origin_url(&self, _dir: &Path, url: &str) -> Result<()> {
            self.calls.borrow_mut().push(format!("set-url {}", url));
            Ok(())
        }
    }

    struct Fixture {
        _temp: TempDir,
        config: Config,
        toolchain: FakeToolchain,
        git: FakeGit,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let root_dir = temp.path().join("go");
            let workspace_dir = temp.path().join("workspace");
            fs::create_dir_all(&root_dir).unwrap();
            fs::create_dir_all(&workspace_dir).unwrap();
            let config = Config::build(
                Overrides {
                    gopath: Some(root_dir.display().to_string()),
                    workspace: Some(workspace_dir),
                    ..Overrides::default()
                },
                FileConfig::default(),
            )
            .unwrap();
            Self {
                _temp: temp,
                toolchain: FakeToolchain {
                    root_dir: config.root_dir.clone(),
                    fail: false,
                    calls: RefCell::new(Vec::new()),
                },
                git: FakeGit {
                    listing: "origin\thttps://example.org/o/p (fetch)\norigin\thttps://example.org/o/p (push)\n"
                        .to_string(),
                    calls: RefCell::new(Vec::new()),
                },
                config,
            }
        }

        fn workspace(&self) -> Workspace<'_> {
            Workspace::new(&self.config, &self.toolchain, &self.git)
        }

        fn root_path(&self) -> PathBuf {
            self.config.root_dir.join("src/example.org/o/p")
        }

        fn link_path(&self) -> PathBuf {
            self.config.workspace_dir.join("p")
        }
    }

    #[test]
    fn test_get_fetches_links_and_rewrites_origin() {
        let fixture = Fixture::new();
        let options = GetOptions {
            fetch: FetchOptions {
                update: true,
                download_only: false,
            },
            ..GetOptions::default()
        };

        fixture
            .workspace()
            .get("https://example.org/o/p.git", &options)
            .unwrap();

        assert_eq!(
            *fixture.toolchain.calls.borrow(),
            vec![("example.org/o/p".to_string(), options.fetch)]
        );
        assert_eq!(fs::read_link(fixture.link_path()).unwrap(), fixture.root_path());
        assert_eq!(
            *fixture.git.calls.borrow(),
            vec!["list-remotes", "set-url git@example.org:o/p.git"]
        );
    }

    #[test]
    fn test_get_no_ssh_leaves_remote() {
        let fixture = Fixture::new();
        let options = GetOptions {
            no_ssh: true,
            ..GetOptions::default()
        };
        fixture.workspace().get("example.org/o/p", &options).unwrap();
        assert!(fixture.git.calls.borrow().is_empty());
    }

    #[test]
    fn test_get_custom_ssh_user() {
        let fixture = Fixture::new();
        let options = GetOptions {
            ssh_user: Some("deploy".to_string()),
            ..GetOptions::default()
        };
        fixture.workspace().get("example.org/o/p", &options).unwrap();
        assert!(fixture
            .git
            .calls
            .borrow()
            .contains(&"set-url deploy@example.org:o/p.git".to_string()));
    }

    #[test]
    fn test_get_stops_at_failed_fetch() {
        let mut fixture = Fixture::new();
        fixture.toolchain.fail = true;

        let err = fixture
            .workspace()
            .get("example.org/o/p", &GetOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("fetch failed"));
        assert!(fs::symlink_metadata(fixture.link_path()).is_err());
        assert!(fixture.git.calls.borrow().is_empty());
    }

    #[test]
    fn test_get_stops_at_refused_link() {
        let fixture = Fixture::new();
        fs::create_dir(fixture.link_path()).unwrap();

        let err = fixture
            .workspace()
            .get("example.org/o/p", &GetOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::PathOccupied { .. }));
        assert!(fixture.git.calls.borrow().is_empty());
    }

    #[test]
    fn test_update_remote_already_ssh() {
        let mut fixture = Fixture::new();
        fixture.git.listing = "origin\tgit@example.org:o/p.git (push)\n".to_string();

        let rewrite = fixture
            .workspace()
            .update_remote("example.org/o/p", None)
            .unwrap();
        assert!(rewrite.is_current());
        assert_eq!(*fixture.git.calls.borrow(), vec!["list-remotes"]);
    }

    #[test]
    fn test_update_remote_without_origin() {
        let mut fixture = Fixture::new();
        fixture.git.listing = String::new();

        let err = fixture
            .workspace()
            .update_remote("example.org/o/p", None)
            .unwrap_err();
        assert!(matches!(err, Error::NoOriginFound));
        assert_eq!(*fixture.git.calls.borrow(), vec!["list-remotes"]);
    }

    #[test]
    fn test_link_and_unlink() {
        let fixture = Fixture::new();
        let workspace = fixture.workspace();

        let locations = workspace.link("example.org/o/p", LinkOptions::default()).unwrap();
        assert_eq!(locations.workspace_path, fixture.link_path());

        let err = workspace
            .link("example.org/o/p", LinkOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyLinked { .. }));

        workspace.unlink("example.org/o/p").unwrap();
        assert!(fs::symlink_metadata(fixture.link_path()).is_err());
    }

    #[test]
    fn test_link_rejects_bare_host() {
        let fixture = Fixture::new();
        let err = fixture
            .workspace()
            .link("example.org", LinkOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingRepositoryPath { .. }));
    }

    #[test]
    fn test_remove_reports_missing_link_and_keeps_checkout() {
        let fixture = Fixture::new();
        fs::create_dir_all(fixture.root_path()).unwrap();

        let err = fixture.workspace().remove("example.org/o/p").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(fixture.root_path().is_dir());
    }

    #[test]
    fn test_remove_deletes_link_and_checkout() {
        let fixture = Fixture::new();
        let workspace = fixture.workspace();
        fs::create_dir_all(fixture.root_path()).unwrap();
        workspace.link("example.org/o/p", LinkOptions::default()).unwrap();

        workspace.remove("example.org/o/p").unwrap();
        assert!(!fixture.root_path().exists());
        assert!(fs::symlink_metadata(fixture.link_path()).is_err());
    }

    #[test]
    fn test_create_new_project() {
        let fixture = Fixture::new();

        let locations = fixture.workspace().create("example.org/o/p").unwrap();
        assert!(locations.root_path.is_dir());
        assert_eq!(fs::read_link(fixture.link_path()).unwrap(), fixture.root_path());
        assert_eq!(
            *fixture.git.calls.borrow(),
            vec![
                format!("init {}", fixture.root_path().display()),
                "add-origin git@example.org:o/p.git".to_string(),
            ]
        );
    }

    #[test]
    fn test_create_refuses_existing_project() {
        let fixture = Fixture::new();
        fs::create_dir_all(fixture.root_path()).unwrap();

        let err = fixture.workspace().create("example.org/o/p").unwrap_err();
        assert!(matches!(err, Error::ProjectExists { .. }));
        assert!(fixture.git.calls.borrow().is_empty());
    }
}
