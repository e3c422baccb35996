//! Application error types using thiserror
//!
//! Error hierarchy:
//! - LockfileError: Issues reading or parsing a structured lockfile
//! - UpdateError: Failures of a single lockfile update task
//! - CommitError: Issues assembling or recording the final commit
//! - IoError: File system operation failures

use std::path::PathBuf;
use thiserror::Error;

/// Errors related to structured lockfile snapshots
#[derive(Error, Debug)]
pub enum LockfileError {
    /// Failed to read lockfile
    #[error("failed to read lockfile {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// The document parsed but has no package list
    #[error("no package list found in {path}")]
    MissingPackages { path: PathBuf },
}

/// Errors that end a single update task
#[derive(Error, Debug)]
pub enum UpdateError {
    /// An external command exited with a non-zero status
    #[error("Failed with {} running `{command}`", display_code(.code))]
    ProcessFailed {
        command: String,
        code: Option<i32>,
        output: Vec<String>,
    },

    /// An external command could not be started
    #[error("failed to execute `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// `git diff --exit-code` returned something other than clean or dirty
    #[error("could not determine whether {file} changed (git exited with {})", display_code(.code))]
    DirtyProbe { file: String, code: Option<i32> },

    /// Lockfile snapshot failed
    #[error(transparent)]
    Lockfile(#[from] LockfileError),

    /// The task panicked or was torn down before producing a result
    #[error("update task for {lockfile} aborted unexpectedly")]
    TaskAborted { lockfile: String },
}

/// Errors related to the final commit
#[derive(Error, Debug)]
pub enum CommitError {
    /// Nothing to assemble a message from
    #[error("no lockfile updates to commit")]
    EmptyResultSet,

    /// The version control operation failed
    #[error(transparent)]
    Vcs(#[from] UpdateError),
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Generic IO error
    #[error("IO error at {path}: {source}")]
    Generic {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

impl LockfileError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LockfileError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        LockfileError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new MissingPackages error
    pub fn missing_packages(path: impl Into<PathBuf>) -> Self {
        LockfileError::MissingPackages { path: path.into() }
    }
}

impl UpdateError {
    /// Creates a new ProcessFailed error
    pub fn process_failed(
        command: impl Into<String>,
        code: Option<i32>,
        output: Vec<String>,
    ) -> Self {
        UpdateError::ProcessFailed {
            command: command.into(),
            code,
            output,
        }
    }

    /// Creates a new SpawnFailed error
    pub fn spawn_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        UpdateError::SpawnFailed {
            command: command.into(),
            source,
        }
    }

    /// Exit code the whole process should report for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            UpdateError::ProcessFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

impl IoError {
    /// Creates a new DirectoryNotFound error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        IoError::DirectoryNotFound { path: path.into() }
    }

    /// Creates a new Generic IO error
    pub fn generic(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Generic {
            path: path.into(),
            source,
        }
    }
}
