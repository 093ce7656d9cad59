// src/engine/reaction_loop.rs

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::config::ReactConfig;
use crate::errors::{ReactError, Result};
use crate::exec::{Console, ReactionOutcome, ReactionRunner};
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::InterruptPolicy;
use crate::watch::{WatchBackend, WatchSet};

use super::core::classify;
use super::shutdown::ShutdownSignal;
use super::{Classification, LoopControl};

/// Watches, classifies, reacts, rebuilds; until shutdown.
///
/// This is the IO shell around [`classify`]: it owns the single active
/// [`WatchSet`], replaces it wholesale on every structural event, and runs
/// reactions one at a time through a [`ReactionRunner`].
pub struct ReactionLoop<B: WatchBackend, R: ReactionRunner> {
    config: Arc<ReactConfig>,
    backend: B,
    runner: R,
    fs: Arc<dyn FileSystem>,
    console: Console,
    shutdown: ShutdownSignal,
}

impl<B: WatchBackend, R: ReactionRunner> fmt::Debug for ReactionLoop<B, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactionLoop")
            .field("config", &self.config)
            .field("shutdown", &self.shutdown)
            .finish_non_exhaustive()
    }
}

/// How a reaction ended from the loop's point of view.
enum ReactionStep {
    Finished(Result<ReactionOutcome>),
    Interrupted,
}

impl<B: WatchBackend, R: ReactionRunner> ReactionLoop<B, R> {
    pub fn new(
        config: Arc<ReactConfig>,
        backend: B,
        runner: R,
        shutdown: ShutdownSignal,
    ) -> Self {
        let console = Console::stdout(config.clear_screen());
        Self {
            config,
            backend,
            runner,
            fs: Arc::new(RealFileSystem),
            console,
            shutdown,
        }
    }

    /// Replace the filesystem used to stat unlabelled creations.
    pub fn with_filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Replace where the banner and separator are written.
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    /// Main loop.
    ///
    /// - Opens a watch set over the configured roots (fatal on failure,
    ///   both at startup and on rebuild).
    /// - Drives it until a structural event or shutdown.
    /// - Closes it before doing anything else, then rebuilds or returns.
    pub async fn run(mut self) -> Result<()> {
        info!(roots = ?self.config.roots(), "watchreact started");

        loop {
            let mut watch_set = self.backend.open(self.config.roots())?;
            let control = self.drive(&mut watch_set).await;
            watch_set.close();

            match control? {
                LoopControl::Rebuild => {
                    debug!("structural change; rebuilding watch set");
                }
                LoopControl::Terminate => {
                    info!("shutdown requested; stopping");
                    return Ok(());
                }
            }
        }
    }

    async fn drive(&mut self, watch_set: &mut WatchSet<B::Subscriber>) -> Result<LoopControl> {
        loop {
            let batch = tokio::select! {
                biased;
                _ = self.shutdown.requested() => return Ok(LoopControl::Terminate),
                batch = watch_set.next_events() => batch,
            };

            let Some(batch) = batch else {
                return Err(ReactError::WatchClosed);
            };

            for event in batch {
                match classify(&event, self.config.predicate(), self.fs.as_ref()) {
                    Classification::Structural => {
                        debug!(path = ?event.target(), kind = ?event.kind, "structural event");
                        return Ok(LoopControl::Rebuild);
                    }
                    Classification::React(target) => {
                        if let Some(control) = self.react(&target).await {
                            return Ok(control);
                        }
                    }
                    Classification::Ignore => {
                        trace!(path = ?event.target(), kind = ?event.kind, "event ignored");
                    }
                }
            }
        }
    }

    /// Run the reaction for `target`. Returns `Some(Terminate)` if shutdown
    /// arrived while the command was running.
    async fn react(&mut self, target: &Path) -> Option<LoopControl> {
        if self.shutdown.is_requested() {
            debug!(path = ?target, "shutdown requested; skipping reaction");
            return Some(LoopControl::Terminate);
        }

        let invocation = self.config.command().invocation_for(target);
        info!(path = ?target, cmd = %invocation, "matching write; running reaction");

        if let Err(err) = self.console.banner(&invocation) {
            warn!(error = %err, "failed to write banner");
        }

        let command_line = invocation.command_line();
        let mut run = self.runner.run(invocation);

        let step = tokio::select! {
            biased;
            result = &mut run => ReactionStep::Finished(result),
            _ = self.shutdown.requested() => ReactionStep::Interrupted,
        };

        let (result, control) = match step {
            ReactionStep::Finished(result) => (Some(result), None),
            ReactionStep::Interrupted => match self.config.on_interrupt() {
                InterruptPolicy::Wait => {
                    info!(cmd = %command_line, "interrupted; waiting for running reaction");
                    (Some(run.await), Some(LoopControl::Terminate))
                }
                InterruptPolicy::Kill => {
                    info!(cmd = %command_line, "interrupted; killing running reaction");
                    drop(run);
                    (None, Some(LoopControl::Terminate))
                }
            },
        };

        if let Some(result) = result {
            report(&command_line, result);
            if let Err(err) = self.console.separator() {
                warn!(error = %err, "failed to write separator");
            }
        }

        control
    }
}

fn report(command_line: &str, result: Result<ReactionOutcome>) {
    match result {
        Ok(ReactionOutcome::Success) => {
            debug!(cmd = %command_line, "reaction succeeded");
        }
        Ok(ReactionOutcome::Failed(code)) => {
            warn!(cmd = %command_line, exit_code = code, "reaction exited with failure");
        }
        Err(err) => {
            warn!(error = %err, "reaction could not be run");
        }
    }
}
