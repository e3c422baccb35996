//! poetry.lock snapshot reader
//!
//! Only the `[[package]]` array of tables is of interest; every entry
//! contributes its `name` and `version`. Other keys are ignored.

use crate::domain::DependencyRecord;
use crate::error::LockfileError;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct PoetryLock {
    package: Option<Vec<DependencyRecord>>,
}

/// Parse poetry.lock content into its locked packages, in file order
pub fn parse_poetry_lock(
    content: &str,
    path: &Path,
) -> Result<Vec<DependencyRecord>, LockfileError> {
    let lock: PoetryLock = toml::from_str(content)
        .map_err(|e| LockfileError::toml_parse_error(path, e.to_string()))?;

    lock.package
        .ok_or_else(|| LockfileError::missing_packages(path))
}

/// Read and parse the poetry.lock at `path`
pub async fn read_poetry_lock(path: &Path) -> Result<Vec<DependencyRecord>, LockfileError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LockfileError::read_error(path, e))?;

    parse_poetry_lock(&content, path)
}
