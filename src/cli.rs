// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::InterruptPolicy;

/// Command-line arguments for `watchreact`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "watchreact",
    version,
    about = "Launch a script when matching files are written.",
    long_about = None
)]
pub struct CliArgs {
    /// Paths to monitor (recursively) for changes.
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,

    /// Files only trigger the reaction if their full path matches this
    /// regular expression (matched from the start of the path).
    #[arg(short, long, value_name = "REGEX", conflicts_with = "pattern")]
    pub regex: Option<String>,

    /// Files only trigger the reaction if their full path matches this shell
    /// pattern, e.g. `*.py`.
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// The script executed upon reaction; `$f` is replaced with the path of
    /// the written file.
    #[arg(short, long, value_name = "COMMAND")]
    pub command: Option<String>,

    /// Optional TOML file with the same settings; flags given on the command
    /// line take precedence.
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Don't clear the terminal before each reaction.
    #[arg(long)]
    pub no_clear: bool,

    /// What to do with a running reaction when interrupted.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_interrupt: Option<InterruptPolicy>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WATCHREACT_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and validate the configuration, print it, but don't watch.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
