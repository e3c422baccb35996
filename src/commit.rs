//! Commit message assembly and the final commit
//!
//! The message has one header naming every changed lockfile, followed by
//! one block of change lines per lockfile:
//!
//! ```text
//! Cargo.lock, flake.lock: update
//!
//! updated serde v1.0.1 -> v1.0.2
//!
//! • Updated input 'nixpkgs':
//! ```

use crate::domain::LockfileUpdate;
use crate::error::CommitError;
use crate::vcs::VersionControl;

/// Build the commit message for `updates`, which must not be empty
pub fn assemble(updates: &[LockfileUpdate]) -> Result<String, CommitError> {
    if updates.is_empty() {
        return Err(CommitError::EmptyResultSet);
    }

    let header = updates
        .iter()
        .map(|update| update.lockfile.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let body = updates
        .iter()
        .map(|update| update.lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(format!("{header}: update\n\n{body}"))
}

/// Assemble the message and commit it unless `no_commit` is set
///
/// Returns the message so the caller can print it either way.
pub async fn commit_updates<V>(
    vcs: &V,
    updates: &[LockfileUpdate],
    no_commit: bool,
) -> Result<String, CommitError>
where
    V: VersionControl + ?Sized,
{
    let message = assemble(updates)?;

    if no_commit {
        log::debug!("not committing, --no-commit given");
    } else {
        vcs.commit(&message).await?;
    }

    Ok(message)
}
