//! update-lockfile - refresh every lockfile in a project in one commit
//!
//! This library provides the building blocks of the `update-lockfile` tool:
//! - Lockfile detection (Cargo.lock, flake.lock, poetry.lock)
//! - Concurrent updates through each lockfile's package manager
//! - Normalization of tool output into commit-ready change lines
//! - Assembly of a single commit message for all changed lockfiles

pub mod cli;
pub mod commit;
pub mod diff;
pub mod domain;
pub mod error;
pub mod lockfile;
pub mod normalize;
pub mod orchestrator;
pub mod process;
pub mod progress;
pub mod updater;
pub mod vcs;
