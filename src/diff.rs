//! Change lines between two snapshots of a structured lockfile
//!
//! Some package managers rewrite their lockfile without reporting what
//! changed. For those the lockfile is parsed before and after the update and
//! the two package lists are compared by name:
//! - `updated {name} {old} -> {new}` for a name whose version changed
//! - `removed {name} {version}` for a name that disappeared
//! - `added {name} {version}` for a name that is new
//!
//! Removed and updated lines follow the order of the old snapshot; added
//! lines follow the order of the new snapshot and come last.

use crate::domain::DependencyRecord;
use std::collections::HashSet;

/// Compute the change lines between `before` and `after`
///
/// Every name produces at most one line, even if a snapshot lists it twice.
pub fn diff(before: &[DependencyRecord], after: &[DependencyRecord]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for old in before {
        if !seen.insert(old.name.as_str()) {
            continue;
        }

        match after.iter().find(|new| new.name == old.name) {
            Some(new) if new.version != old.version => {
                lines.push(format!(
                    "updated {} {} -> {}",
                    old.name, old.version, new.version
                ));
            }
            Some(_) => {}
            None => lines.push(format!("removed {} {}", old.name, old.version)),
        }
    }

    for new in after {
        if seen.insert(new.name.as_str()) {
            lines.push(format!("added {} {}", new.name, new.version));
        }
    }

    lines
}
