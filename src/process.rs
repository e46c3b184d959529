//! Running external programs.
//!
//! Two shapes are needed: commands whose stdout is shown to the user as it
//! is produced (the toolchain fetch), and commands whose stdout is parsed
//! (`git remote -v`). Stderr of streamed commands is inherited so progress
//! and diagnostics reach the terminal unchanged.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use crate::error::{Error, Result};

/// Render a command line for logs and error messages.
pub fn describe(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn command(program: &str, args: &[&str], cwd: Option<&Path>) -> Command {
    let mut command = Command::new(program);
    command.args(args);
    if let Some(cwd) = cwd {
        command.current_dir(cwd);
    }
    command
}

/// Run a command, copying its stdout into `out` while it runs.
///
/// The copy runs on a scoped thread that is joined before this returns, so
/// everything the child wrote has reached `out` by then.
pub fn run_streaming(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
    out: &mut (dyn Write + Send),
) -> Result<()> {
    let command_line = describe(program, args);
    let spawn_error = |source: io::Error| Error::Spawn {
        command: command_line.clone(),
        source,
    };

    let mut child = command(program, args, cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(spawn_error)?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| spawn_error(io::Error::other("stdout was not captured")))?;

    let status = thread::scope(|scope| -> io::Result<_> {
        let pump = scope.spawn(move || io::copy(&mut stdout, out));
        let status = child.wait();
        pump.join()
            .map_err(|_| io::Error::other("output copy thread panicked"))??;
        status
    })?;

    if !status.success() {
        return Err(Error::CommandFailed {
            command: command_line,
            status,
            stderr: String::new(),
        });
    }
    Ok(())
}

/// Run a command to completion and return its stdout.
pub fn run_capture(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let command_line = describe(program, args);
    let output = command(program, args, cwd)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| Error::Spawn {
            command: command_line.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(Error::CommandFailed {
            command: command_line,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
