//! Locked dependency records read from structured lockfiles

use serde::Deserialize;
use std::fmt;

/// A single locked package as recorded in a lockfile
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct DependencyRecord {
    /// Package name
    pub name: String,
    /// Locked version
    pub version: String,
}

impl DependencyRecord {
    /// Creates a new record
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for DependencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}
