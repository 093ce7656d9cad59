// src/engine/mod.rs

//! The watch-and-react engine.
//!
//! The loop has three states:
//! - **Running**: one open watch set, waiting for events.
//! - **Rebuilding**: a structural event was seen; the watch set is closed and
//!   a new one is opened over the same roots.
//! - **Terminated**: shutdown was requested; the watch set is closed and the
//!   loop returns `Ok(())`.
//!
//! Event classification is pure and lives in [`core`]; the async shell that
//! owns the watch set and runs reactions is [`reaction_loop`].

use std::path::PathBuf;

/// What a single event means for the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Directory topology changed: rebuild the watch set.
    Structural,
    /// A matching file was written: run the reaction for this path.
    React(PathBuf),
    /// No observable effect.
    Ignore,
}

/// Why the inner loop over one watch set stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Running -> Rebuilding.
    Rebuild,
    /// Running -> Terminated.
    Terminate,
}

pub mod core;
pub mod reaction_loop;
pub mod shutdown;

pub use core::classify;
pub use reaction_loop::ReactionLoop;
pub use shutdown::{shutdown_channel, ShutdownHandle, ShutdownSignal};
