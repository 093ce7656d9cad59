// src/exec/task_runner.rs

//! Real reaction process runner.

use std::future::Future;
use std::pin::Pin;

use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{ReactError, Result};
use crate::exec::backend::{ReactionOutcome, ReactionRunner};
use crate::exec::command::Invocation;

/// Runs the invocation directly (no shell) with inherited stdio, so the
/// command writes straight to the terminal between banner and separator.
///
/// The child is spawned with `kill_on_drop(true)`: if the loop drops the
/// future (interrupt with `InterruptPolicy::Kill`), the process is killed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ReactionRunner for ProcessRunner {
    fn run(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<ReactionOutcome>> + Send + '_>> {
        Box::pin(async move {
            let command_line = invocation.command_line();
            info!(cmd = %command_line, "starting reaction process");

            let mut cmd = Command::new(&invocation.program);
            cmd.args(&invocation.args).kill_on_drop(true);

            let mut child = cmd.spawn().map_err(|source| ReactError::ReactionExecution {
                command: command_line.clone(),
                source,
            })?;

            let status = child
                .wait()
                .await
                .map_err(|source| ReactError::ReactionExecution {
                    command: command_line.clone(),
                    source,
                })?;

            let code = status.code().unwrap_or(-1);
            debug!(
                cmd = %command_line,
                exit_code = code,
                success = status.success(),
                "reaction process exited"
            );

            Ok(if status.success() {
                ReactionOutcome::Success
            } else {
                ReactionOutcome::Failed(code)
            })
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn successful_command_reports_success() {
        let outcome = ProcessRunner
            .run(Invocation::from_line("true"))
            .await
            .unwrap();
        assert_eq!(outcome, ReactionOutcome::Success);
    }

    #[tokio::test]
    async fn non_zero_exit_is_reported() {
        let outcome = ProcessRunner
            .run(Invocation::from_line("false"))
            .await
            .unwrap();
        assert_eq!(outcome, ReactionOutcome::Failed(1));
    }

    #[tokio::test]
    async fn missing_program_is_a_launch_error() {
        let err = ProcessRunner
            .run(Invocation::from_line("/definitely/not/a/program --flag"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReactError::ReactionExecution { .. }));
    }
}
