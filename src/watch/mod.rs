// src/watch/mod.rs

//! File watching.
//!
//! This module is responsible for:
//! - Holding recursive `notify` subscriptions over the watch roots as one
//!   all-or-nothing [`WatchSet`].
//! - Turning raw `notify` events into the three [`FsEvent`] kinds the
//!   reaction loop classifies.
//! - Compiling the user's regex or shell pattern into a [`MatchPredicate`].
//!
//! It does **not** decide what an event means; that is the engine's job.

pub mod event;
pub mod patterns;
pub mod watcher;

pub use event::{FsEvent, FsEventKind};
pub use patterns::{MatchPredicate, MATCH_ALL};
pub use watcher::{
    NotifyBackend, NotifyMessage, NotifySubscriber, Subscriber, WatchBackend, WatchRoot, WatchSet,
};
