//! Lockfile detection in the project root

use crate::domain::LockfileSpec;
use crate::error::IoError;
use std::collections::HashSet;
use std::path::Path;

/// List the names of all regular files directly inside `dir`
pub fn list_file_names(dir: &Path) -> Result<HashSet<String>, IoError> {
    if !dir.is_dir() {
        return Err(IoError::directory_not_found(dir));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IoError::generic(dir, e))?;
    let mut names = HashSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| IoError::generic(dir, e))?;
        if entry.path().is_file() {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }

    Ok(names)
}

/// Detect every supported lockfile present in `dir`
///
/// The result follows the supported-set order, not directory order, so the
/// same project always launches its updates in the same order.
pub fn detect_lockfiles(dir: &Path) -> Result<Vec<&'static LockfileSpec>, IoError> {
    let present = list_file_names(dir)?;

    Ok(LockfileSpec::all()
        .filter(|spec| present.contains(spec.file_name))
        .collect())
}
