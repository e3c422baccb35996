//! Version control operations
//!
//! The updaters stage each changed lockfile; the final step records one
//! commit for all of them. Both go through the `git` binary via a
//! [`ProcessRunner`].

use crate::error::UpdateError;
use crate::process::ProcessRunner;
use async_trait::async_trait;

/// Trait for staging and committing files
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Stage `file` for the next commit
    async fn stage(&self, file: &str) -> Result<(), UpdateError>;

    /// Commit everything staged with `message`
    async fn commit(&self, message: &str) -> Result<(), UpdateError>;
}

/// Git through the command line
pub struct Git<R> {
    runner: R,
}

impl<R: ProcessRunner> Git<R> {
    /// Create a git client running commands through `runner`
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn run(&self, argv: &[&str]) -> Result<(), UpdateError> {
        self.runner.execute(argv).await?.check(&argv.join(" "))?;
        Ok(())
    }
}

#[async_trait]
impl<R: ProcessRunner> VersionControl for Git<R> {
    async fn stage(&self, file: &str) -> Result<(), UpdateError> {
        log::debug!("staging {}", file);
        self.run(&["git", "add", file]).await
    }

    async fn commit(&self, message: &str) -> Result<(), UpdateError> {
        self.run(&["git", "commit", "-m", message]).await
    }
}
