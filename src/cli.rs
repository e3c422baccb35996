//! CLI argument parsing module for update-lockfile

use crate::domain::LockfileKind;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Parse a `--skip` value into a lockfile kind
fn parse_skip(s: &str) -> Result<LockfileKind, String> {
    let flag = s.trim().to_lowercase();
    LockfileKind::from_skip_flag(&flag).ok_or_else(|| {
        let accepted: Vec<_> = LockfileKind::all()
            .iter()
            .map(|kind| kind.skip_flag())
            .collect();
        format!(
            "invalid lockfile kind '{}': expected one of {}",
            s,
            accepted.join(", ")
        )
    })
}

/// Update every lockfile in a project and commit the result
#[derive(Parser, Debug, Clone)]
#[command(name = "update-lockfile", version, about = "Update lockfiles")]
pub struct CliArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Update lockfiles without a commit
    #[arg(short = 'n', long)]
    pub no_commit: bool,

    /// Skip this type of lockfile: cargo, flake or poetry (can be given multiple times)
    #[arg(short, long, value_parser = parse_skip, action = ArgAction::Append)]
    pub skip: Vec<LockfileKind>,

    /// Enable quiet mode - no spinners and no tool output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Log filter used unless RUST_LOG says otherwise
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }
}
