//! Tool output normalization
//!
//! Each package manager prints its changes in its own wording. The rules
//! here reduce that output to the lines worth keeping in a commit message.
//! They are tied to the current CLI wording of each tool, so every tool gets
//! its own [`OutputStyle`].

/// Cargo's index refresh notice, compared after lowercasing
const CARGO_INDEX_NOTICE: &str = "updating crates.io index";

/// Bullet nix uses for each updated flake input
const FLAKE_BULLET: &str = "• ";

/// How raw tool output becomes change lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// `cargo update`: one line per package, verb first
    Cargo,
    /// `nix flake update`: bulleted inputs with indented details
    Flake,
    /// Tool output carries nothing usable; lines come from lockfile snapshots
    Snapshot,
}

impl OutputStyle {
    /// Whether change lines are computed from before/after lockfile snapshots
    pub fn needs_snapshot(&self) -> bool {
        matches!(self, OutputStyle::Snapshot)
    }
}

/// Reduce raw tool output to change lines for the given style
pub fn normalize(style: OutputStyle, raw_lines: &[String]) -> Vec<String> {
    match style {
        OutputStyle::Cargo => raw_lines
            .iter()
            .filter_map(|line| normalize_cargo_line(line))
            .collect(),
        OutputStyle::Flake => raw_lines
            .iter()
            .filter(|line| line.starts_with(FLAKE_BULLET) || line.starts_with("  "))
            .cloned()
            .collect(),
        OutputStyle::Snapshot => Vec::new(),
    }
}

fn normalize_cargo_line(line: &str) -> Option<String> {
    let line = line.trim().to_lowercase();
    if line.is_empty()
        || line == CARGO_INDEX_NOTICE
        || line.starts_with("note:")
        || line.starts_with("locking ")
    {
        return None;
    }

    let mut words = line.split_whitespace();
    let verb = words.next()?;
    let verb = match verb.strip_suffix("ing") {
        Some(stem) => format!("{stem}ed"),
        None => verb.to_string(),
    };

    let rest: Vec<&str> = words.collect();
    if rest.is_empty() {
        Some(verb)
    } else {
        Some(format!("{verb} {}", rest.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cargo_drops_index_notice() {
        let out = normalize(OutputStyle::Cargo, &lines(&["    Updating crates.io index"]));
        assert!(out.is_empty());
    }

    #[test]
    fn test_cargo_rewrites_verb() {
        let out = normalize(
            OutputStyle::Cargo,
            &lines(&["    Updating foo v1.0.0 -> v1.0.1"]),
        );
        assert_eq!(out, vec!["updated foo v1.0.0 -> v1.0.1"]);
    }

    #[test]
    fn test_cargo_full_output() {
        let raw = lines(&[
            "    Updating crates.io index",
            "     Locking 3 packages to latest compatible versions",
            "    Updating serde v1.0.200 -> v1.0.210",
            "    Removing windows-sys v0.48.0",
            "      Adding  itoa v1.0.11",
            "note: pass `--verbose` to see 12 unchanged dependencies behind latest",
        ]);

        assert_eq!(
            normalize(OutputStyle::Cargo, &raw),
            vec![
                "updated serde v1.0.200 -> v1.0.210",
                "removed windows-sys v0.48.0",
                "added itoa v1.0.11",
            ]
        );
    }

    #[test]
    fn test_cargo_keeps_verb_without_suffix() {
        let out = normalize(OutputStyle::Cargo, &lines(&["Downgraded bar v2.0.0 -> v1.9.0"]));
        assert_eq!(out, vec!["downgraded bar v2.0.0 -> v1.9.0"]);
    }

    #[test]
    fn test_cargo_suffix_heuristic_is_literal() {
        // "unchanging" is not a dictionary verb; the rewrite is purely textual
        let out = normalize(OutputStyle::Cargo, &lines(&["Unchanging baz v0.1.0"]));
        assert_eq!(out, vec!["unchanged baz v0.1.0"]);
    }

    #[test]
    fn test_cargo_skips_blank_lines() {
        let out = normalize(OutputStyle::Cargo, &lines(&["", "   "]));
        assert!(out.is_empty());
    }

    #[test]
    fn test_flake_keeps_bullets_and_continuations() {
        let raw = lines(&[
            "warning: Git tree '/home/user/project' is dirty",
            "unpacking 'github:NixOS/nixpkgs/abc' into the Git cache...",
            "• Updated input 'nixpkgs':",
            "    'github:NixOS/nixpkgs/abc' (2024-01-01)",
            "  → 'github:NixOS/nixpkgs/def' (2024-02-01)",
        ]);

        assert_eq!(
            normalize(OutputStyle::Flake, &raw),
            vec![
                "• Updated input 'nixpkgs':",
                "    'github:NixOS/nixpkgs/abc' (2024-01-01)",
                "  → 'github:NixOS/nixpkgs/def' (2024-02-01)",
            ]
        );
    }

    #[test]
    fn test_snapshot_discards_everything() {
        let raw = lines(&["Updating dependencies", "Resolving dependencies..."]);
        assert!(normalize(OutputStyle::Snapshot, &raw).is_empty());
    }

    #[test]
    fn test_needs_snapshot() {
        assert!(OutputStyle::Snapshot.needs_snapshot());
        assert!(!OutputStyle::Cargo.needs_snapshot());
        assert!(!OutputStyle::Flake.needs_snapshot());
    }
}
