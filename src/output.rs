//! # Terminal Output
//!
//! Most of what gotter says goes through the `log` facade. The one line that
//! does not is the final status after a failed command, which is written
//! directly to stderr so it shows at every verbosity. Whether that line
//! carries an emoji or a plain tag depends on [`OutputConfig`]:
//!
//! - `--color=always|never` forces the choice
//! - `NO_COLOR` (any value) or `CLICOLOR=0` or `TERM=dumb` turn it off
//! - `CLICOLOR_FORCE=1` turns it on even when stderr is not a terminal
//! - otherwise the `console` crate decides from the terminal's capabilities

use std::env;

/// Whether decorated output should be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Build from the `--color` flag value and the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect(),
        };
        Self { use_color }
    }

    fn detect() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stderr().features().colors_supported()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Outcome of a whole invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failed,
}

impl Status {
    /// The line printed at exit, styled per `config`.
    pub fn render(self, config: OutputConfig) -> String {
        let (decorated, plain, word) = match self {
            Status::Success => ("✅", "[OK]", "SUCCESS"),
            Status::Failed => ("❌", "[ERROR]", "FAILED"),
        };
        let marker = if config.use_color { decorated } else { plain };
        let line = format!("{} Status: {}", marker, word);
        if config.use_color {
            match self {
                Status::Success => console::style(line).for_stderr().green().to_string(),
                Status::Failed => console::style(line).for_stderr().red().bold().to_string(),
            }
        } else {
            line
        }
    }
}
