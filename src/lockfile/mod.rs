//! Lockfile discovery and structured lockfile snapshots
//!
//! This module provides functionality to:
//! - Detect which supported lockfiles exist in a project directory
//! - Read poetry.lock into a list of locked packages

mod detector;
mod poetry;

pub use detector::{detect_lockfiles, list_file_names};
pub use poetry::{parse_poetry_lock, read_poetry_lock};
