//! update-lockfile - refresh every lockfile in a project in one commit
//!
//! Supported lockfiles:
//! - Cargo.lock (cargo update)
//! - flake.lock (nix flake update)
//! - poetry.lock (poetry update --lock)

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use std::sync::Arc;
use update_lockfile::cli::CliArgs;
use update_lockfile::commit::commit_updates;
use update_lockfile::error::CommitError;
use update_lockfile::orchestrator::Orchestrator;
use update_lockfile::process::SystemRunner;
use update_lockfile::progress::ProgressBoard;
use update_lockfile::vcs::Git;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    log::debug!("update-lockfile v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("target: {}", args.path.display());

    let board = ProgressBoard::new(!args.quiet);
    let runner = SystemRunner::new(&args.path, board.clone());
    let vcs = Arc::new(Git::new(runner.clone()));
    let orchestrator = Orchestrator::new(&args.path, Arc::new(runner), Arc::clone(&vcs), board);

    let result = orchestrator
        .run_detected(&args.skip)
        .await
        .with_context(|| format!("failed to look for lockfiles in {}", args.path.display()))?;

    if let Some(message) = result.status_message() {
        println!("{}", message);
        return Ok(ExitCode::SUCCESS);
    }

    let mut code = result.exit_code();

    if !result.updates.is_empty() {
        match commit_updates(vcs.as_ref(), &result.updates, args.no_commit).await {
            Ok(message) => println!("{}", message),
            Err(CommitError::Vcs(e)) => {
                eprintln!("{}", e.to_string().red());
                if code == 0 {
                    code = e.exit_code();
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    if !result.failures.is_empty() {
        let failed: Vec<_> = result.failures.iter().map(|f| f.lockfile).collect();
        eprintln!(
            "{} {}",
            "Failed to update:".red().bold(),
            failed.join(", ")
        );
    }

    Ok(to_exit_code(code))
}

fn to_exit_code(code: i32) -> ExitCode {
    match u8::try_from(code) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}
