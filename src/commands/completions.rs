//! Completions command implementation
//!
//! Prints a completion script for `gotter` to stdout:
//!
//! ```bash
//! gotter completions bash > ~/.local/share/bash-completion/completions/gotter
//! gotter completions zsh > ~/.zfunc/_gotter
//! ```
//!
//! This command needs neither `GOPATH` nor `WORKSPACE`.

use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::cli::Cli;

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` into `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

/// Execute the completions command
pub fn execute(args: CompletionsArgs) -> Result<()> {
    write_completions(args.shell, &mut io::stdout());
    Ok(())
}
