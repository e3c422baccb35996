//! Progress display for lockfile updates
//!
//! Provides one spinner per running update using indicatif. Tool output is
//! echoed through the same board so it scrolls above the spinners instead of
//! tearing through them.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Shared progress board; cheap to clone
#[derive(Clone)]
pub struct ProgressBoard {
    /// Whether spinners and tool output are shown (disabled in quiet mode)
    enabled: bool,
    multi: MultiProgress,
}

/// How a task ended, as shown on its spinner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The lockfile changed and was staged
    Updated,
    /// The tool ran but the lockfile is unchanged
    Unchanged,
    /// The update failed
    Failed,
}

/// Spinner owned by a single update task
pub struct TaskProgress {
    bar: ProgressBar,
}

impl ProgressBoard {
    /// Create a new progress board
    pub fn new(enabled: bool) -> Self {
        let multi = if enabled {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };
        Self { enabled, multi }
    }

    /// Create a disabled progress board
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Whether this board shows anything
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Add a spinner for a newly launched task
    pub fn add_task(&self, description: String) -> TaskProgress {
        if !self.enabled {
            return TaskProgress {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = self.multi.add(ProgressBar::new_spinner());
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars(TICK_CHARS)
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid template"),
        );
        bar.set_message(description);
        bar.enable_steady_tick(Duration::from_millis(80));
        TaskProgress { bar }
    }

    /// Print a line of tool output above the spinners
    pub fn echo(&self, line: &str) {
        if !self.enabled {
            return;
        }

        // Without a terminal the board draws nothing, including printed lines
        if self.multi.is_hidden() || self.multi.println(line).is_err() {
            println!("{line}");
        }
    }

    /// Print a message that must reach the user even in quiet mode
    pub fn report(&self, line: &str) {
        if !self.enabled || self.multi.is_hidden() || self.multi.println(line).is_err() {
            eprintln!("{line}");
        }
    }
}

impl Default for ProgressBoard {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TaskProgress {
    /// Mark the task resolved with its final description
    pub fn resolve(&self, resolution: Resolution, description: String) {
        let mark = match resolution {
            Resolution::Updated | Resolution::Unchanged => "✅",
            Resolution::Failed => "❌",
        };
        self.bar.set_style(
            ProgressStyle::default_spinner()
                .template(&format!("{mark} {{msg}}"))
                .expect("Invalid template"),
        );
        self.bar.finish_with_message(description);
    }

    /// Whether the spinner has been resolved
    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}
