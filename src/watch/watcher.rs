// src/watch/watcher.rs

use std::fmt;
use std::path::{Path, PathBuf};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::{ReactError, Result};
use crate::watch::event::FsEvent;

/// A path watched recursively. The same set of roots is reused on every
/// rebuild.
pub type WatchRoot = PathBuf;

/// What the platform watcher pushes into a watch set's channel.
pub type NotifyMessage = notify::Result<Event>;

/// One recursive subscription per root.
///
/// This is the seam between [`WatchSet`] and the platform: production code
/// uses [`NotifySubscriber`], tests can record subscribe/unsubscribe calls or
/// make specific roots fail.
pub trait Subscriber: Send {
    fn subscribe(&mut self, root: &Path) -> notify::Result<()>;
    fn unsubscribe(&mut self, root: &Path) -> notify::Result<()>;
}

/// `notify`-backed subscriber.
///
/// Dropping it drops the underlying `RecommendedWatcher`, which also drops
/// the channel sender so the paired receiver drains and then ends.
pub struct NotifySubscriber {
    inner: RecommendedWatcher,
}

impl fmt::Debug for NotifySubscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifySubscriber").finish_non_exhaustive()
    }
}

impl NotifySubscriber {
    /// Create a platform watcher and the channel its events arrive on.
    pub fn new() -> Result<(Self, mpsc::UnboundedReceiver<NotifyMessage>)> {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<NotifyMessage>();

        // Called synchronously on notify's own thread.
        let inner = RecommendedWatcher::new(
            move |res: NotifyMessage| {
                // The receiver only goes away together with the watch set.
                let _ = event_tx.send(res);
            },
            Config::default(),
        )
        .map_err(ReactError::WatcherInit)?;

        Ok((Self { inner }, event_rx))
    }
}

impl Subscriber for NotifySubscriber {
    fn subscribe(&mut self, root: &Path) -> notify::Result<()> {
        self.inner.watch(root, RecursiveMode::Recursive)
    }

    fn unsubscribe(&mut self, root: &Path) -> notify::Result<()> {
        self.inner.unwatch(root)
    }
}

/// Live recursive subscriptions over a fixed set of roots.
///
/// - [`WatchSet::open`] is all-or-nothing: if any root fails, every root
///   subscribed during that attempt is released before the error is returned.
/// - [`WatchSet::close`] is idempotent and also runs on drop, so every exit
///   path from the owning scope releases the subscriptions exactly once.
pub struct WatchSet<S: Subscriber = NotifySubscriber> {
    subscriber: Option<S>,
    active: Vec<WatchRoot>,
    events_rx: mpsc::UnboundedReceiver<NotifyMessage>,
}

impl<S: Subscriber> fmt::Debug for WatchSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchSet")
            .field("active", &self.active)
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

impl<S: Subscriber> WatchSet<S> {
    /// Subscribe `subscriber` to every root, delivering events from
    /// `events_rx`.
    pub fn open(
        mut subscriber: S,
        events_rx: mpsc::UnboundedReceiver<NotifyMessage>,
        roots: &[WatchRoot],
    ) -> Result<Self> {
        let mut active: Vec<WatchRoot> = Vec::with_capacity(roots.len());

        for root in roots {
            if let Err(source) = subscriber.subscribe(root) {
                warn!(root = ?root, error = %source, "failed to watch root; releasing partial watch set");
                for done in active.iter().rev() {
                    release(&mut subscriber, done);
                }
                return Err(ReactError::WatchSetup {
                    path: root.clone(),
                    source,
                });
            }
            active.push(root.clone());
        }

        info!(roots = ?active, "watch set opened");

        Ok(Self {
            subscriber: Some(subscriber),
            active,
            events_rx,
        })
    }

    pub fn is_open(&self) -> bool {
        self.subscriber.is_some()
    }

    /// Wait for the next batch of events.
    ///
    /// Suspends until at least one relevant event is pending, then also takes
    /// everything else already queued. Returns `None` once the set is closed
    /// or the platform side has gone away.
    ///
    /// Cancel-safe: the only await point is the channel receive.
    pub async fn next_events(&mut self) -> Option<Vec<FsEvent>> {
        if !self.is_open() {
            return None;
        }

        loop {
            let first = self.events_rx.recv().await?;

            let mut batch = Vec::new();
            absorb(first, &mut batch);
            while let Ok(more) = self.events_rx.try_recv() {
                absorb(more, &mut batch);
            }

            if !batch.is_empty() {
                debug!(count = batch.len(), "event batch ready");
                return Some(batch);
            }
        }
    }

    /// Release every subscription. Safe to call more than once.
    pub fn close(&mut self) {
        let Some(mut subscriber) = self.subscriber.take() else {
            return;
        };

        for root in self.active.drain(..).rev() {
            release(&mut subscriber, &root);
        }
        drop(subscriber);
        self.events_rx.close();

        debug!("watch set closed");
    }
}

impl<S: Subscriber> Drop for WatchSet<S> {
    fn drop(&mut self) {
        self.close();
    }
}

fn release<S: Subscriber>(subscriber: &mut S, root: &Path) {
    if let Err(err) = subscriber.unsubscribe(root) {
        // The root may already be gone (e.g. it was deleted); nothing to do.
        debug!(root = ?root, error = %err, "unwatch failed");
    }
}

fn absorb(message: NotifyMessage, batch: &mut Vec<FsEvent>) {
    match message {
        Ok(event) => batch.extend(FsEvent::from_notify(&event)),
        Err(err) => warn!(error = %err, "file watch error"),
    }
}

/// Opens watch sets; the reaction loop calls this at startup and on every
/// rebuild.
pub trait WatchBackend: Send {
    type Subscriber: Subscriber;

    fn open(&mut self, roots: &[WatchRoot]) -> Result<WatchSet<Self::Subscriber>>;
}

/// Production backend: a fresh `notify` watcher per watch set.
///
/// Reactions need close-after-write events, so this is only fully
/// functional on Linux (see [`FsEvent::from_notify`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct NotifyBackend;

impl WatchBackend for NotifyBackend {
    type Subscriber = NotifySubscriber;

    fn open(&mut self, roots: &[WatchRoot]) -> Result<WatchSet<NotifySubscriber>> {
        let (subscriber, events_rx) = NotifySubscriber::new()?;
        WatchSet::open(subscriber, events_rx, roots)
    }
}
