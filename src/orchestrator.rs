//! Update orchestrator for running every lockfile update concurrently
//!
//! This module provides:
//! - Planning: detected lockfiles minus the skipped kinds
//! - One task per lockfile, all running at once
//! - Per-task progress reporting as each task resolves
//! - Error handling with partial continuation
//!
//! Tasks resolve in whatever order their tools finish, but results are
//! always reported in launch order so the commit message is reproducible.

use crate::domain::{LockfileKind, LockfileSpec, LockfileUpdate};
use crate::error::{IoError, UpdateError};
use crate::lockfile::detect_lockfiles;
use crate::process::ProcessRunner;
use crate::progress::{ProgressBoard, Resolution, TaskProgress};
use crate::updater::update_lockfile;
use crate::vcs::VersionControl;
use colored::Colorize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Reported when no applicable lockfile exists
pub const NO_LOCKFILES_MESSAGE: &str = "No lockfiles to update";

/// Reported when every tool left its lockfile unchanged
pub const UP_TO_DATE_MESSAGE: &str = "All lockfiles are up-to-date";

/// Lifecycle of one update task
#[derive(Debug)]
pub enum TaskState {
    /// Launched and not yet resolved
    Running,
    /// Finished; `None` if the lockfile did not change
    Succeeded(Option<LockfileUpdate>),
    /// Finished with an error
    Failed(UpdateError),
}

impl TaskState {
    /// Whether no further transition can happen
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskState::Running)
    }
}

/// A launched update and everything the orchestrator knows about it
struct TrackedTask {
    spec: &'static LockfileSpec,
    progress: TaskProgress,
    state: TaskState,
}

impl TrackedTask {
    fn new(spec: &'static LockfileSpec, progress: TaskProgress) -> Self {
        Self {
            spec,
            progress,
            state: TaskState::Running,
        }
    }

    /// Record the task's outcome; returns false if it was already resolved
    fn resolve(&mut self, outcome: Result<Option<LockfileUpdate>, UpdateError>) -> bool {
        if self.state.is_terminal() {
            return false;
        }

        let (resolution, description) = match &outcome {
            Ok(Some(_)) => (Resolution::Updated, self.spec.description_updated()),
            Ok(None) => (Resolution::Unchanged, self.spec.description_no_update()),
            Err(_) => (Resolution::Failed, self.spec.description_error()),
        };
        self.progress.resolve(resolution, description);

        self.state = match outcome {
            Ok(update) => TaskState::Succeeded(update),
            Err(error) => TaskState::Failed(error),
        };
        true
    }
}

/// A task that ended in an error
#[derive(Debug)]
pub struct TaskFailure {
    /// Lockfile the task was updating
    pub lockfile: &'static str,
    /// Why it failed
    pub error: UpdateError,
}

/// Result of running the orchestrator
#[derive(Debug, Default)]
pub struct OrchestratorResult {
    /// Number of tasks launched
    pub launched: usize,
    /// Changed lockfiles, in launch order
    pub updates: Vec<LockfileUpdate>,
    /// Failed tasks, in launch order
    pub failures: Vec<TaskFailure>,
}

impl OrchestratorResult {
    /// Message to show when there is nothing to commit and nothing failed
    pub fn status_message(&self) -> Option<&'static str> {
        if self.launched == 0 {
            Some(NO_LOCKFILES_MESSAGE)
        } else if self.updates.is_empty() && self.failures.is_empty() {
            Some(UP_TO_DATE_MESSAGE)
        } else {
            None
        }
    }

    /// Process exit code: the first failed task's, or 0
    pub fn exit_code(&self) -> i32 {
        self.failures
            .first()
            .map(|failure| failure.error.exit_code())
            .unwrap_or(0)
    }
}

/// Orchestrator for running lockfile updates
pub struct Orchestrator<R, V> {
    /// Project directory holding the lockfiles
    project_dir: PathBuf,
    /// Runner for the package manager commands
    runner: Arc<R>,
    /// Version control used to stage changed lockfiles
    vcs: Arc<V>,
    /// Progress display shared by all tasks
    board: ProgressBoard,
}

impl<R, V> Orchestrator<R, V>
where
    R: ProcessRunner + 'static,
    V: VersionControl + 'static,
{
    /// Create a new orchestrator
    pub fn new(
        project_dir: impl Into<PathBuf>,
        runner: Arc<R>,
        vcs: Arc<V>,
        board: ProgressBoard,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            runner,
            vcs,
            board,
        }
    }

    /// Detect lockfiles and drop the skipped kinds
    pub fn plan(&self, skip: &[LockfileKind]) -> Result<Vec<&'static LockfileSpec>, IoError> {
        let mut planned = Vec::new();
        for spec in detect_lockfiles(&self.project_dir)? {
            if skip.contains(&spec.kind) {
                println!("Skipping {}", spec.file_name);
            } else {
                planned.push(spec);
            }
        }
        Ok(planned)
    }

    /// Detect, filter and run in one go
    pub async fn run_detected(
        &self,
        skip: &[LockfileKind],
    ) -> Result<OrchestratorResult, IoError> {
        let specs = self.plan(skip)?;
        Ok(self.run(&specs).await)
    }

    /// Run one update task per spec and wait for all of them
    pub async fn run(&self, specs: &[&'static LockfileSpec]) -> OrchestratorResult {
        if specs.is_empty() {
            return OrchestratorResult::default();
        }

        let mut set = JoinSet::new();
        let mut index_of = HashMap::new();
        let mut tasks = Vec::with_capacity(specs.len());

        for (index, spec) in specs.iter().copied().enumerate() {
            let progress = self.board.add_task(spec.description());
            let runner = Arc::clone(&self.runner);
            let vcs = Arc::clone(&self.vcs);
            let project_dir = self.project_dir.clone();

            let handle = set.spawn(async move {
                update_lockfile(spec, &project_dir, runner.as_ref(), vcs.as_ref()).await
            });
            index_of.insert(handle.id(), index);
            tasks.push(TrackedTask::new(spec, progress));
            log::debug!("launched update for {}", spec.file_name);
        }

        // Tasks are yielded as they finish, so a slow tool never delays
        // reporting a fast one.
        while let Some(joined) = set.join_next_with_id().await {
            let (id, outcome) = match joined {
                Ok((id, outcome)) => (id, outcome),
                Err(join_error) => {
                    let id = join_error.id();
                    let lockfile = index_of
                        .get(&id)
                        .map(|&index| tasks[index].spec.file_name)
                        .unwrap_or("unknown lockfile");
                    log::warn!("update task for {} panicked: {}", lockfile, join_error);
                    let aborted = UpdateError::TaskAborted {
                        lockfile: lockfile.to_string(),
                    };
                    (id, Err(aborted))
                }
            };

            let Some(&index) = index_of.get(&id) else {
                continue;
            };
            let task = &mut tasks[index];
            if !task.resolve(outcome) {
                continue;
            }

            if let TaskState::Failed(error) = &task.state {
                log::debug!("{} failed: {}", task.spec.file_name, error);
                self.board.report(&error.to_string().red().to_string());
                // Output was not echoed while running quietly
                if !self.board.is_enabled() {
                    if let UpdateError::ProcessFailed { output, .. } = error {
                        for line in output {
                            self.board.report(line);
                        }
                    }
                }
            } else {
                log::debug!("{} resolved", task.spec.file_name);
            }
        }

        let mut result = OrchestratorResult {
            launched: tasks.len(),
            ..Default::default()
        };
        for task in tasks {
            match task.state {
                TaskState::Succeeded(Some(update)) => result.updates.push(update),
                TaskState::Succeeded(None) => {}
                TaskState::Failed(error) => result.failures.push(TaskFailure {
                    lockfile: task.spec.file_name,
                    error,
                }),
                TaskState::Running => {
                    // The join set only drains once every task has finished
                    log::warn!("{} never resolved", task.spec.file_name);
                }
            }
        }

        result
    }
}
