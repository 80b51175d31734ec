//! Bridge from a submitted line to a `kubectl` child process.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
};

use anyhow::{Context, Result, bail};
use crossterm::style::Stylize;
use tokio::process::Command;
use tracing::{debug, info};

const SHELL: &str = "/bin/sh";

/// What happened to a submitted line.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank line; nothing ran.
    Skipped,
    /// `exit` or `quit`; the session should end.
    Exit,
    Executed(ExitStatus),
}

/// Runs submitted lines as `kubectl <line>` through `/bin/sh`, so pipes and
/// redirections in the line behave as in a terminal.
#[derive(Clone, Debug)]
pub struct Executor {
    kubectl: PathBuf,
}

impl Executor {
    pub fn new(kubectl: impl Into<PathBuf>) -> Self {
        Self { kubectl: kubectl.into() }
    }

    pub fn kubectl(&self) -> &Path {
        &self.kubectl
    }

    /// Runs `line` with inherited stdio and waits for it.
    pub async fn on_submit(&self, line: &str) -> Result<SubmitOutcome> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(SubmitOutcome::Skipped);
        }
        if is_exit(line) {
            return Ok(SubmitOutcome::Exit);
        }
        info!(line = %line, "executing");
        let status = self
            .command(line)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("failed to run {SHELL}"))?;
        debug!(line = %line, status = %status, "command finished");
        Ok(SubmitOutcome::Executed(status))
    }

    /// Runs `line` and returns its standard output.
    pub async fn capture(&self, line: &str) -> Result<String> {
        let line = line.trim();
        if line.is_empty() {
            bail!("no arguments to pass to {}", self.kubectl.display());
        }
        let output = self
            .command(line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("failed to run {SHELL}"))?;
        if !output.status.success() {
            bail!(
                "`{} {}` failed with {}: {}",
                self.kubectl.display(),
                line,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// `sh -c '"$0" <line>' <kubectl>`: the program path reaches the shell as
    /// `$0`, so spaces or metacharacters in it are never reinterpreted.
    fn command(&self, line: &str) -> Command {
        let mut command = Command::new(SHELL);
        command
            .arg("-c")
            .arg(format!("\"$0\" {line}"))
            .arg(&self.kubectl)
            .kill_on_drop(true);
        command
    }
}

pub fn is_exit(line: &str) -> bool {
    matches!(line.trim(), "exit" | "quit")
}

/// True when `line` may have changed the active kubeconfig context or its
/// namespace.
pub fn touches_kubeconfig(line: &str) -> bool {
    line.split(' ').find(|token| !token.is_empty()) == Some("config")
}

/// Prints a failure the way the shell reports every command error.
pub fn report_error(message: impl std::fmt::Display) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{}", format!("Got error: {message}").red());
}
