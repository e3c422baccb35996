//! External process execution
//!
//! This module provides:
//! - The `ProcessRunner` seam the updaters depend on
//! - A tokio-backed runner that streams and captures combined output
//! - The git dirty probe

use crate::error::UpdateError;
use crate::progress::ProgressBoard;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

/// Exit status and captured output of one external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,
    /// Non-empty stdout and stderr lines, in arrival order
    pub lines: Vec<String>,
}

impl ProcessOutcome {
    /// Create a new outcome
    pub fn new(code: Option<i32>, lines: Vec<String>) -> Self {
        Self { code, lines }
    }

    /// Whether the process exited with status 0
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a non-zero exit into a `ProcessFailed` error
    pub fn check(self, command: &str) -> Result<Vec<String>, UpdateError> {
        if self.success() {
            Ok(self.lines)
        } else {
            Err(UpdateError::process_failed(command, self.code, self.lines))
        }
    }
}

/// Trait for running external commands
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `argv` to completion and capture its combined output
    async fn execute(&self, argv: &[&str]) -> Result<ProcessOutcome, UpdateError>;

    /// Whether `file` differs from the last committed revision
    async fn probe_dirty(&self, file: &str) -> Result<bool, UpdateError>;
}

/// Runner that spawns real processes in the project directory
#[derive(Clone)]
pub struct SystemRunner {
    working_dir: PathBuf,
    board: ProgressBoard,
}

impl SystemRunner {
    /// Create a runner rooted at `working_dir` that echoes output to `board`
    pub fn new(working_dir: impl Into<PathBuf>, board: ProgressBoard) -> Self {
        Self {
            working_dir: working_dir.into(),
            board,
        }
    }

    /// Directory every command runs in
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn command(&self, argv: &[&str]) -> Result<Command, UpdateError> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            UpdateError::spawn_failed(
                "",
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "Empty command"),
            )
        })?;

        let mut command = Command::new(program);
        command
            .args(args)
            .current_dir(&self.working_dir)
            .env("NO_COLOR", "1")
            .env("CARGO_TERM_COLOR", "never")
            .stdin(Stdio::null());
        Ok(command)
    }
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn execute(&self, argv: &[&str]) -> Result<ProcessOutcome, UpdateError> {
        let command_line = argv.join(" ");
        log::debug!("running `{}` in {}", command_line, self.working_dir.display());

        let mut child = self
            .command(argv)?
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| UpdateError::spawn_failed(&command_line, e))?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_lines(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_lines(stderr, tx.clone()));
        }
        drop(tx);

        let mut lines = Vec::new();
        while let Some(line) = rx.recv().await {
            self.board.echo(&line);
            if !line.is_empty() {
                lines.push(line);
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|e| UpdateError::spawn_failed(&command_line, e))?;
        log::debug!("`{}` exited with {:?}", command_line, status.code());

        Ok(ProcessOutcome::new(status.code(), lines))
    }

    async fn probe_dirty(&self, file: &str) -> Result<bool, UpdateError> {
        let argv = ["git", "diff", "-s", "--exit-code", file];
        let status = self
            .command(&argv)?
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| UpdateError::spawn_failed(argv.join(" "), e))?;

        match status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            code => Err(UpdateError::DirtyProbe {
                file: file.to_string(),
                code,
            }),
        }
    }
}

/// Send every line of `reader` to `tx` until EOF
///
/// Lines are decoded lossily. The pipe is drained even when a line is not
/// valid UTF-8, so the child never dies writing to a closed pipe.
async fn forward_lines<R>(reader: R, tx: mpsc::UnboundedSender<String>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches('\n').trim_end_matches('\r');
                // A gone receiver still leaves the pipe to drain
                let _ = tx.send(line.to_string());
            }
            Err(e) => {
                log::debug!("stopped reading process output: {}", e);
                break;
            }
        }
    }
}
