//! Integration tests for update-lockfile
//!
//! These tests verify:
//! - Concurrent updates resolve independently of each other
//! - Results are reported in launch order, not completion order
//! - Failed updates do not prevent committing the successful ones
//! - The assembled commit message for a full run

use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use update_lockfile::commit::commit_updates;
use update_lockfile::domain::{LockfileKind, LockfileSpec};
use update_lockfile::error::UpdateError;
use update_lockfile::orchestrator::{Orchestrator, NO_LOCKFILES_MESSAGE};
use update_lockfile::process::{ProcessOutcome, ProcessRunner};
use update_lockfile::progress::ProgressBoard;
use update_lockfile::vcs::VersionControl;

/// Canned behaviour for one command
#[derive(Clone)]
struct Script {
    delay: Duration,
    code: i32,
    lines: Vec<String>,
    dirty: bool,
    rewrite: Option<(String, String)>,
}

impl Script {
    fn new(delay_ms: u64, code: i32, lines: &[&str], dirty: bool) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            code,
            lines: lines.iter().map(|s| s.to_string()).collect(),
            dirty,
            rewrite: None,
        }
    }

    fn rewriting(mut self, file: &str, content: &str) -> Self {
        self.rewrite = Some((file.to_string(), content.to_string()));
        self
    }
}

/// Runner that replays scripts per program and records completion order
struct ScriptedRunner {
    dir: std::path::PathBuf,
    scripts: HashMap<&'static str, Script>,
    completed: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            scripts: HashMap::new(),
            completed: Mutex::new(Vec::new()),
        }
    }

    fn with(mut self, kind: LockfileKind, script: Script) -> Self {
        self.scripts.insert(kind.spec().file_name, script);
        self
    }

    fn script_for_command(&self, argv: &[&str]) -> Option<(&'static str, &Script)> {
        LockfileSpec::all()
            .find(|spec| spec.command == argv)
            .and_then(|spec| {
                self.scripts
                    .get(spec.file_name)
                    .map(|script| (spec.file_name, script))
            })
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn execute(&self, argv: &[&str]) -> Result<ProcessOutcome, UpdateError> {
        let Some((file_name, script)) = self.script_for_command(argv) else {
            return Ok(ProcessOutcome::new(Some(0), Vec::new()));
        };

        tokio::time::sleep(script.delay).await;
        if let Some((file, content)) = &script.rewrite {
            fs::write(self.dir.join(file), content).unwrap();
        }
        self.completed.lock().unwrap().push(file_name.to_string());
        Ok(ProcessOutcome::new(Some(script.code), script.lines.clone()))
    }

    async fn probe_dirty(&self, file: &str) -> Result<bool, UpdateError> {
        Ok(self.scripts.get(file).map(|s| s.dirty).unwrap_or(false))
    }
}

#[derive(Default)]
struct RecordingVcs {
    staged: Mutex<Vec<String>>,
    commits: Mutex<Vec<String>>,
}

#[async_trait]
impl VersionControl for RecordingVcs {
    async fn stage(&self, file: &str) -> Result<(), UpdateError> {
        self.staged.lock().unwrap().push(file.to_string());
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<(), UpdateError> {
        self.commits.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

const POETRY_BEFORE: &str = r#"
[[package]]
name = "requests"
version = "2.31.0"

[[package]]
name = "urllib3"
version = "2.0.7"
"#;

const POETRY_AFTER: &str = r#"
[[package]]
name = "requests"
version = "2.32.3"

[[package]]
name = "urllib3"
version = "2.0.7"
"#;

fn create_project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn orchestrator(
    dir: &Path,
    runner: ScriptedRunner,
) -> (
    Orchestrator<ScriptedRunner, RecordingVcs>,
    Arc<ScriptedRunner>,
    Arc<RecordingVcs>,
) {
    let runner = Arc::new(runner);
    let vcs = Arc::new(RecordingVcs::default());
    let orchestrator = Orchestrator::new(
        dir,
        Arc::clone(&runner),
        Arc::clone(&vcs),
        ProgressBoard::disabled(),
    );
    (orchestrator, runner, vcs)
}

#[tokio::test]
async fn test_results_follow_launch_order_not_completion_order() {
    let dir = create_project(&[
        ("Cargo.lock", ""),
        ("flake.lock", ""),
        ("poetry.lock", POETRY_BEFORE),
    ]);
    let runner = ScriptedRunner::new(dir.path())
        .with(
            LockfileKind::Cargo,
            Script::new(120, 0, &["    Updating serde v1.0.1 -> v1.0.2"], true),
        )
        .with(
            LockfileKind::Flake,
            Script::new(0, 0, &["• Updated input 'nixpkgs':"], true),
        )
        .with(
            LockfileKind::Poetry,
            Script::new(60, 0, &["Updating dependencies"], true)
                .rewriting("poetry.lock", POETRY_AFTER),
        );
    let (orchestrator, runner, vcs) = orchestrator(dir.path(), runner);

    let result = orchestrator.run_detected(&[]).await.unwrap();

    assert_eq!(
        *runner.completed.lock().unwrap(),
        vec!["flake.lock", "poetry.lock", "Cargo.lock"],
        "tools should finish in delay order"
    );
    let names: Vec<_> = result.updates.iter().map(|u| u.lockfile.as_str()).collect();
    assert_eq!(names, vec!["Cargo.lock", "flake.lock", "poetry.lock"]);
    assert_eq!(vcs.staged.lock().unwrap().len(), 3);

    let message = commit_updates(vcs.as_ref(), &result.updates, false)
        .await
        .unwrap();
    assert_eq!(
        message,
        "Cargo.lock, flake.lock, poetry.lock: update\n\n\
         updated serde v1.0.1 -> v1.0.2\n\n\
         • Updated input 'nixpkgs':\n\n\
         updated requests 2.31.0 -> 2.32.3"
    );
    assert_eq!(*vcs.commits.lock().unwrap(), vec![message]);
}

#[tokio::test]
async fn test_failure_does_not_stop_siblings() {
    let dir = create_project(&[("Cargo.lock", ""), ("flake.lock", ""), ("poetry.lock", "")]);
    let runner = ScriptedRunner::new(dir.path())
        .with(
            LockfileKind::Cargo,
            Script::new(50, 0, &["    Adding itoa v1.0.11"], true),
        )
        .with(
            LockfileKind::Flake,
            Script::new(0, 7, &["error: cannot connect"], true),
        )
        .with(LockfileKind::Poetry, Script::new(0, 0, &[], true));
    let (orchestrator, _runner, vcs) = orchestrator(dir.path(), runner);

    let result = orchestrator.run_detected(&[]).await.unwrap();

    // flake fails on its exit code, poetry on its empty lockfile
    assert_eq!(result.launched, 3);
    assert_eq!(result.failures.len(), 2);
    assert_eq!(result.failures[0].lockfile, "flake.lock");
    assert_eq!(result.failures[1].lockfile, "poetry.lock");
    assert!(matches!(result.failures[1].error, UpdateError::Lockfile(_)));
    assert_eq!(result.exit_code(), 7);

    assert_eq!(result.updates.len(), 1);
    assert_eq!(result.updates[0].lines, vec!["added itoa v1.0.11"]);
    assert_eq!(*vcs.staged.lock().unwrap(), vec!["Cargo.lock"]);
}

#[tokio::test]
async fn test_unchanged_lockfiles_are_left_out() {
    let dir = create_project(&[("Cargo.lock", ""), ("flake.lock", "")]);
    let runner = ScriptedRunner::new(dir.path())
        .with(
            LockfileKind::Cargo,
            Script::new(0, 0, &["    Updating crates.io index"], false),
        )
        .with(
            LockfileKind::Flake,
            Script::new(10, 0, &["• Updated input 'utils':"], true),
        );
    let (orchestrator, _runner, vcs) = orchestrator(dir.path(), runner);

    let result = orchestrator.run_detected(&[]).await.unwrap();

    assert_eq!(result.updates.len(), 1);
    assert_eq!(result.updates[0].lockfile, "flake.lock");
    assert_eq!(result.status_message(), None);
    assert_eq!(*vcs.staged.lock().unwrap(), vec!["flake.lock"]);
}

#[tokio::test]
async fn test_skipped_kinds_are_not_launched() {
    let dir = create_project(&[("Cargo.lock", ""), ("flake.lock", "")]);
    let runner = ScriptedRunner::new(dir.path())
        .with(
            LockfileKind::Cargo,
            Script::new(0, 0, &["Updating a v1 -> v2"], true),
        )
        .with(LockfileKind::Flake, Script::new(0, 0, &["• x"], true));
    let (orchestrator, runner, _vcs) = orchestrator(dir.path(), runner);

    let result = orchestrator
        .run_detected(&[LockfileKind::Cargo, LockfileKind::Flake])
        .await
        .unwrap();

    assert_eq!(result.launched, 0);
    assert_eq!(result.status_message(), Some(NO_LOCKFILES_MESSAGE));
    assert!(runner.completed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_no_lockfiles_stages_and_commits_nothing() {
    let dir = create_project(&[("README.md", "# project")]);
    let (orchestrator, runner, vcs) = orchestrator(dir.path(), ScriptedRunner::new(dir.path()));

    let result = orchestrator.run_detected(&[]).await.unwrap();

    assert_eq!(result.status_message(), Some(NO_LOCKFILES_MESSAGE));
    assert_eq!(result.exit_code(), 0);
    assert!(runner.completed.lock().unwrap().is_empty());
    assert!(vcs.staged.lock().unwrap().is_empty());
    assert!(vcs.commits.lock().unwrap().is_empty());
}
