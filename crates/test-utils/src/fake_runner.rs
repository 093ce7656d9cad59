use std::future::Future;
use std::io::Write;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use watchreact::errors::{ReactError, Result};
use watchreact::exec::{Invocation, ReactionOutcome, ReactionRunner};

use crate::SharedBuffer;

/// A fake runner that:
/// - records every invocation it is asked to run (`started`)
/// - optionally writes `output of <cmd>` into a shared terminal buffer
/// - optionally blocks until [`RecordingRunner::release`] is called
/// - records invocations that ran to completion (`completed`)
#[derive(Clone, Default)]
pub struct RecordingRunner {
    started: Arc<Mutex<Vec<String>>>,
    completed: Arc<Mutex<Vec<String>>>,
    terminal: Option<SharedBuffer>,
    gate: Option<Arc<Notify>>,
    outcome: Option<ReactionOutcome>,
    fail_launch: bool,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write each command's "output" into `terminal`.
    pub fn with_terminal(mut self, terminal: SharedBuffer) -> Self {
        self.terminal = Some(terminal);
        self
    }

    /// Hold every run until [`RecordingRunner::release`] is called.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    /// Report this outcome instead of `Success`.
    pub fn with_outcome(mut self, outcome: ReactionOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// Fail every run as if the program could not be launched.
    pub fn failing_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn started(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }

    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

impl ReactionRunner for RecordingRunner {
    fn run(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<ReactionOutcome>> + Send + '_>> {
        let line = invocation.command_line();
        self.started.lock().unwrap().push(line.clone());

        Box::pin(async move {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }

            if self.fail_launch {
                return Err(ReactError::ReactionExecution {
                    command: line,
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such program"),
                });
            }

            if let Some(terminal) = &mut self.terminal {
                writeln!(terminal, "output of {line}").unwrap();
            }
            self.completed.lock().unwrap().push(line);
            Ok(self.outcome.unwrap_or(ReactionOutcome::Success))
        })
    }
}
