//! Core domain models for update-lockfile
//!
//! This module contains the fundamental types used throughout the application:
//! - Supported lockfile kinds and their static descriptors
//! - Locked dependency records read from structured lockfiles
//! - Per-lockfile update results

mod dependency;
mod lockfile;
mod update_result;

pub use dependency::DependencyRecord;
pub use lockfile::{LockfileKind, LockfileSpec};
pub use update_result::LockfileUpdate;
