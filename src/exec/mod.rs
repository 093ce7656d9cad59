// src/exec/mod.rs

//! Reaction execution layer.
//!
//! - [`command`] holds the command template and `$f` substitution.
//! - [`console`] prints the banner and separator around each reaction.
//! - [`backend`] provides the `ReactionRunner` trait the loop talks to.
//! - [`task_runner`] is the production runner built on
//!   `tokio::process::Command`.

pub mod backend;
pub mod command;
pub mod console;
pub mod task_runner;

pub use backend::{ReactionOutcome, ReactionRunner};
pub use command::{Invocation, ReactionCommand, PLACEHOLDER};
pub use console::{Console, SEPARATOR};
pub use task_runner::ProcessRunner;
