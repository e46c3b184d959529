//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;

use gotter::config::{default_config_path, Config, FileConfig, Overrides};

use crate::commands;

/// gotter - Utility to unify and manage Go projects into a single workspace
#[derive(Parser, Debug)]
#[command(name = "gotter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

/// Options shared by every subcommand
#[derive(Args, Debug)]
struct GlobalArgs {
    /// Workspace directory holding one link per project
    #[arg(long, global = true, value_name = "DIR", env = "WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Go root; projects are checked out under <GOPATH>/src
    #[arg(long, global = true, value_name = "DIR", env = "GOPATH")]
    gopath: Option<String>,

    /// Configuration file (defaults to <config dir>/gotter/config.toml)
    #[arg(long, global = true, value_name = "PATH", env = "GOTTER_CONFIG")]
    config: Option<PathBuf>,

    /// Go toolchain binary
    #[arg(long, global = true, value_name = "PATH", env = "GOTTER_GO")]
    go_bin: Option<String>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LevelFilter>,

    /// Enable verbose logging (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Project(ProjectCommand),
    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

/// Commands that operate on a project and need a [`Config`]
#[derive(Subcommand, Debug)]
enum ProjectCommand {
    /// 'go get' a repo, link it to your workspace, and switch its origin to SSH
    Get(commands::get::GetArgs),
    /// Clone the repo into your GOPATH
    Clone(commands::clone::CloneArgs),
    /// Create a link from GOPATH/src/<project> to WORKSPACE/<leaf>
    Link(commands::link::LinkArgs),
    /// Update the git remote origin url to use SSH
    UpdateRemote(commands::update_remote::UpdateRemoteArgs),
    /// Remove both the workspace link and the project folder
    Rm(commands::rm::RmArgs),
    /// Create a new project with a GOPATH folder, a git repo and a workspace link
    New(commands::new::NewArgs),
}

impl GlobalArgs {
    fn log_level(&self) -> LevelFilter {
        self.log_level.unwrap_or(match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        })
    }

    /// Layer flags and environment over the configuration file.
    fn load_config(&self) -> Result<Config> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?,
            None => match default_config_path() {
                Some(path) => FileConfig::load_optional(&path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?
                    .unwrap_or_default(),
                None => FileConfig::default(),
            },
        };

        let overrides = Overrides {
            gopath: self.gopath.clone(),
            workspace: self.workspace.clone(),
            go: self.go_bin.clone(),
            ..Overrides::default()
        };
        Ok(Config::build(overrides, file)?)
    }
}

impl Cli {
    /// Color setting for the final status line.
    pub fn color(&self) -> &str {
        &self.global.color
    }

    /// Effective log level: `--log-level` wins, otherwise warn raised by `-v`.
    pub fn log_level(&self) -> LevelFilter {
        self.global.log_level()
    }

    /// Install the stderr logger. `RUST_LOG` can still refine it.
    pub fn init_logging(&self) {
        env_logger::Builder::new()
            .filter_level(self.log_level())
            .format_timestamp(None)
            .format_target(false)
            .parse_default_env()
            .init();
    }

    /// Execute the CLI command
    ///
    /// Completions run without configuration; every other command needs
    /// the root and workspace directories.
    pub fn execute(self) -> Result<()> {
        let command = match self.command {
            Commands::Completions(args) => return commands::completions::execute(args),
            Commands::Project(command) => command,
        };
        let config = self.global.load_config()?;
        match command {
            ProjectCommand::Get(args) => commands::get::execute(args, &config),
            ProjectCommand::Clone(args) => commands::clone::execute(args, &config),
            ProjectCommand::Link(args) => commands::link::execute(args, &config),
            ProjectCommand::UpdateRemote(args) => commands::update_remote::execute(args, &config),
            ProjectCommand::Rm(args) => commands::rm::execute(args, &config),
            ProjectCommand::New(args) => commands::new::execute(args, &config),
        }
    }
}
