// src/config/model.rs

use serde::Deserialize;

use crate::exec::ReactionCommand;
use crate::types::InterruptPolicy;
use crate::watch::{MatchPredicate, WatchRoot};

/// Configuration as read from a TOML file or assembled from CLI flags.
///
/// ```toml
/// paths = ["src", "tests"]
/// pattern = "*.py"          # or: regex = ".*\\.py"
/// command = "pytest $f"
/// clear_screen = true
/// on_interrupt = "wait"     # or "kill"
/// ```
///
/// Every key is optional here; [`ReactConfig::try_from`] decides what is
/// actually required.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    /// Roots to watch recursively.
    #[serde(default)]
    pub paths: Vec<String>,

    /// Regular expression matched from the start of the full path.
    #[serde(default)]
    pub regex: Option<String>,

    /// Shell pattern; mutually exclusive with `regex`.
    #[serde(default)]
    pub pattern: Option<String>,

    /// Command template; `$f` is replaced with the written file's path.
    #[serde(default)]
    pub command: Option<String>,

    /// Clear the terminal before each reaction (default `true`).
    #[serde(default)]
    pub clear_screen: Option<bool>,

    /// What to do with a running reaction on Ctrl-C (default `wait`).
    #[serde(default)]
    pub on_interrupt: Option<InterruptPolicy>,
}

impl RawConfigFile {
    /// Layer `other` on top of `self`, field by field.
    ///
    /// A non-empty `paths` list in `other` replaces ours. If `other` picks a
    /// matcher (`regex` or `pattern`), both of our matcher keys are dropped,
    /// so a CLI `-p` can override a file's `regex` without tripping the
    /// mutual-exclusion check.
    pub fn overlay(mut self, other: RawConfigFile) -> RawConfigFile {
        if !other.paths.is_empty() {
            self.paths = other.paths;
        }
        if other.regex.is_some() || other.pattern.is_some() {
            self.regex = other.regex;
            self.pattern = other.pattern;
        }
        if other.command.is_some() {
            self.command = other.command;
        }
        if other.clear_screen.is_some() {
            self.clear_screen = other.clear_screen;
        }
        if other.on_interrupt.is_some() {
            self.on_interrupt = other.on_interrupt;
        }
        self
    }
}

/// Validated configuration, built once at startup and shared read-only by
/// the reaction loop.
#[derive(Debug, Clone)]
pub struct ReactConfig {
    roots: Vec<WatchRoot>,
    predicate: MatchPredicate,
    command: ReactionCommand,
    clear_screen: bool,
    on_interrupt: InterruptPolicy,
}

impl ReactConfig {
    /// Internal constructor used after validation.
    pub(crate) fn new_unchecked(
        roots: Vec<WatchRoot>,
        predicate: MatchPredicate,
        command: ReactionCommand,
        clear_screen: bool,
        on_interrupt: InterruptPolicy,
    ) -> Self {
        Self {
            roots,
            predicate,
            command,
            clear_screen,
            on_interrupt,
        }
    }

    pub fn roots(&self) -> &[WatchRoot] {
        &self.roots
    }

    pub fn predicate(&self) -> &MatchPredicate {
        &self.predicate
    }

    pub fn command(&self) -> &ReactionCommand {
        &self.command
    }

    pub fn clear_screen(&self) -> bool {
        self.clear_screen
    }

    pub fn on_interrupt(&self) -> InterruptPolicy {
        self.on_interrupt
    }
}
