//! # gotter CLI
//!
//! This is the binary entry point for the `gotter` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging from the verbosity flags.
//! - Executing the selected command and turning its result into the process
//!   exit status, with a single status line on failure.
//!
//! The core logic lives in the `gotter` library crate; the binary is a thin
//! wrapper around it.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use gotter::output::{OutputConfig, Status};

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    cli.init_logging();

    let output = OutputConfig::from_env_and_flag(cli.color());
    let verbose = cli.log_level() >= LevelFilter::Info;

    match cli.execute() {
        Ok(()) => {
            if verbose {
                eprintln!("{}", Status::Success.render(output));
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            eprintln!("{}", Status::Failed.render(output));
            ExitCode::FAILURE
        }
    }
}
