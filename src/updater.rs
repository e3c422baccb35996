//! Refreshing a single lockfile
//!
//! Every lockfile goes through the same steps:
//! 1. Snapshot the lockfile if its tool does not report changes
//! 2. Run the tool and fail on a non-zero exit
//! 3. Stop if git reports the lockfile unchanged
//! 4. Stage the lockfile
//! 5. Derive change lines from the snapshots or the tool output

use crate::diff::diff;
use crate::domain::{LockfileSpec, LockfileUpdate};
use crate::error::UpdateError;
use crate::lockfile::read_poetry_lock;
use crate::normalize::normalize;
use crate::process::ProcessRunner;
use crate::vcs::VersionControl;
use std::path::Path;

/// Refresh the lockfile described by `spec` inside `project_dir`
///
/// Returns `Ok(None)` if the tool succeeded but left the lockfile untouched.
pub async fn update_lockfile<R, V>(
    spec: &LockfileSpec,
    project_dir: &Path,
    runner: &R,
    vcs: &V,
) -> Result<Option<LockfileUpdate>, UpdateError>
where
    R: ProcessRunner + ?Sized,
    V: VersionControl + ?Sized,
{
    let lockfile_path = project_dir.join(spec.file_name);

    let before = if spec.style.needs_snapshot() {
        Some(read_poetry_lock(&lockfile_path).await?)
    } else {
        None
    };

    let output = runner
        .execute(spec.command)
        .await?
        .check(&spec.command_line())?;

    let dirty = runner.probe_dirty(spec.file_name).await?;
    log::debug!("{} dirty: {}", spec.file_name, dirty);
    if !dirty {
        return Ok(None);
    }

    vcs.stage(spec.file_name).await?;

    let lines = match before {
        Some(before) => {
            let after = read_poetry_lock(&lockfile_path).await?;
            diff(&before, &after)
        }
        None => normalize(spec.style, &output),
    };

    if lines.is_empty() {
        log::debug!("{} changed but no package versions did", spec.file_name);
    }

    Ok(Some(LockfileUpdate::new(spec.file_name, lines)))
}
