//! Result of refreshing a single lockfile

/// Change lines produced for one lockfile that was modified by its tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockfileUpdate {
    /// Lockfile name used in the commit header
    pub lockfile: String,
    /// Human-readable change lines, in tool order
    pub lines: Vec<String>,
}

impl LockfileUpdate {
    /// Creates a new update
    pub fn new(lockfile: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            lockfile: lockfile.into(),
            lines,
        }
    }

    /// Returns true if no change line could be derived
    ///
    /// Only snapshot-diffed lockfiles can end up here, e.g. when poetry
    /// rewrote hashes without changing any version.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
