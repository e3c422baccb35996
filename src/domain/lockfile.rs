//! Supported lockfile kinds and their static descriptors

use crate::normalize::OutputStyle;
use std::fmt;

/// Lockfile kinds this tool knows how to refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockfileKind {
    /// Cargo.lock, refreshed with `cargo update`
    Cargo,
    /// flake.lock, refreshed with `nix flake update`
    Flake,
    /// poetry.lock, refreshed with `poetry update --lock`
    Poetry,
}

impl LockfileKind {
    /// Returns all supported kinds in discovery order
    pub fn all() -> &'static [LockfileKind] {
        &[LockfileKind::Cargo, LockfileKind::Flake, LockfileKind::Poetry]
    }

    /// Returns the identifier accepted by `--skip`
    pub fn skip_flag(&self) -> &'static str {
        match self {
            LockfileKind::Cargo => "cargo",
            LockfileKind::Flake => "flake",
            LockfileKind::Poetry => "poetry",
        }
    }

    /// Looks up a kind by its `--skip` identifier
    pub fn from_skip_flag(flag: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.skip_flag() == flag)
    }

    /// Returns the static descriptor for this kind
    pub fn spec(&self) -> &'static LockfileSpec {
        match self {
            LockfileKind::Cargo => &CARGO,
            LockfileKind::Flake => &FLAKE,
            LockfileKind::Poetry => &POETRY,
        }
    }
}

impl fmt::Display for LockfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.skip_flag())
    }
}

/// Immutable descriptor of one supported lockfile
#[derive(Debug, PartialEq, Eq)]
pub struct LockfileSpec {
    /// Which kind this descriptor belongs to
    pub kind: LockfileKind,
    /// Canonical file name in the project root
    pub file_name: &'static str,
    /// Label shown in front of progress messages
    pub label: &'static str,
    /// Command that refreshes the lockfile
    pub command: &'static [&'static str],
    /// How the command's output turns into change lines
    pub style: OutputStyle,
}

static CARGO: LockfileSpec = LockfileSpec {
    kind: LockfileKind::Cargo,
    file_name: "Cargo.lock",
    label: "🦀",
    command: &["cargo", "update"],
    style: OutputStyle::Cargo,
};

static FLAKE: LockfileSpec = LockfileSpec {
    kind: LockfileKind::Flake,
    file_name: "flake.lock",
    label: "❄️",
    command: &["nix", "flake", "update"],
    style: OutputStyle::Flake,
};

static POETRY: LockfileSpec = LockfileSpec {
    kind: LockfileKind::Poetry,
    file_name: "poetry.lock",
    label: "📖",
    command: &["poetry", "update", "--no-interaction", "--no-ansi", "--lock"],
    style: OutputStyle::Snapshot,
};

impl LockfileSpec {
    /// Returns the descriptors of every supported lockfile in discovery order
    pub fn all() -> impl Iterator<Item = &'static LockfileSpec> {
        LockfileKind::all().iter().map(|kind| kind.spec())
    }

    /// Identifier accepted by `--skip`
    pub fn skip_flag(&self) -> &'static str {
        self.kind.skip_flag()
    }

    /// Command line as a single printable string
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }

    pub fn description(&self) -> String {
        format!("{} Updating {}...", self.label, self.file_name)
    }

    pub fn description_updated(&self) -> String {
        format!("{} Updated {}", self.label, self.file_name)
    }

    pub fn description_no_update(&self) -> String {
        format!("{} {} is up-to-date!", self.label, self.file_name)
    }

    pub fn description_error(&self) -> String {
        format!("{} Failed to update {}", self.label, self.file_name)
    }
}
