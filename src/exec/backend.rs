// src/exec/backend.rs

//! Pluggable reaction runner abstraction.
//!
//! The reaction loop talks to a `ReactionRunner` instead of spawning
//! processes itself. Production code uses [`ProcessRunner`]; tests provide a
//! runner that records invocations without touching the OS.
//!
//! [`ProcessRunner`]: crate::exec::task_runner::ProcessRunner

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::exec::command::Invocation;

/// How a reaction process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    Success,
    /// Non-zero exit; `-1` when the process was ended by a signal.
    Failed(i32),
}

/// Trait abstracting how a reaction command is run.
///
/// The returned future resolves once the process has exited. Dropping it
/// early must not leave the process running.
pub trait ReactionRunner: Send {
    fn run(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<ReactionOutcome>> + Send + '_>>;
}
