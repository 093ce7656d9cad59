use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use notify::event::{AccessKind, AccessMode, CreateKind, RemoveKind};
use notify::{Event, EventKind};
use tokio::sync::mpsc;
use watchreact::errors::Result;
use watchreact::watch::{NotifyMessage, Subscriber, WatchBackend, WatchRoot, WatchSet};

/// One observable operation on the fake platform watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchOp {
    Subscribe(PathBuf),
    Unsubscribe(PathBuf),
    /// The subscriber (and with it the event channel) was dropped.
    Released,
}

/// Shared, append-only log of [`WatchOp`]s across every watch set a backend
/// opened.
#[derive(Debug, Clone, Default)]
pub struct WatchLog(Arc<Mutex<Vec<WatchOp>>>);

impl WatchLog {
    pub fn ops(&self) -> Vec<WatchOp> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, op: &WatchOp) -> usize {
        self.0.lock().unwrap().iter().filter(|o| *o == op).count()
    }

    pub fn releases(&self) -> usize {
        self.count(&WatchOp::Released)
    }

    /// Roots subscribed and not yet unsubscribed.
    pub fn active(&self) -> Vec<PathBuf> {
        let mut active = Vec::new();
        for op in self.0.lock().unwrap().iter() {
            match op {
                WatchOp::Subscribe(p) => active.push(p.clone()),
                WatchOp::Unsubscribe(p) => {
                    if let Some(pos) = active.iter().position(|a| a == p) {
                        active.remove(pos);
                    }
                }
                WatchOp::Released => {}
            }
        }
        active
    }

    fn push(&self, op: WatchOp) {
        self.0.lock().unwrap().push(op);
    }
}

/// Subscriber that records what it is asked to do and can be told to fail
/// for one root.
pub struct FakeSubscriber {
    log: WatchLog,
    fail_on: Option<PathBuf>,
    // Keeps the event channel open for as long as the watch set is.
    _events_tx: mpsc::UnboundedSender<NotifyMessage>,
}

impl Subscriber for FakeSubscriber {
    fn subscribe(&mut self, root: &Path) -> notify::Result<()> {
        if self.fail_on.as_deref() == Some(root) {
            return Err(notify::Error::path_not_found().add_path(root.to_path_buf()));
        }
        self.log.push(WatchOp::Subscribe(root.to_path_buf()));
        Ok(())
    }

    fn unsubscribe(&mut self, root: &Path) -> notify::Result<()> {
        self.log.push(WatchOp::Unsubscribe(root.to_path_buf()));
        Ok(())
    }
}

impl Drop for FakeSubscriber {
    fn drop(&mut self) {
        self.log.push(WatchOp::Released);
    }
}

/// Backend that replays one scripted batch of `notify` events per opened
/// watch set.
///
/// Generation `n` (0-based) gets the `n`-th script; once the scripts run out,
/// new watch sets simply wait forever.
#[derive(Default)]
pub struct ScriptedBackend {
    scripts: VecDeque<Vec<Event>>,
    fail_on: Option<(usize, PathBuf)>,
    opens: Arc<Mutex<usize>>,
    log: WatchLog,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events delivered to the next not-yet-scripted watch set.
    pub fn then(mut self, events: Vec<Event>) -> Self {
        self.scripts.push_back(events);
        self
    }

    /// Make subscribing `root` fail on the `open_index`-th open (0-based).
    pub fn fail_on(mut self, open_index: usize, root: &str) -> Self {
        self.fail_on = Some((open_index, PathBuf::from(root)));
        self
    }

    pub fn log(&self) -> WatchLog {
        self.log.clone()
    }

    /// Handle to the number of `open` calls so far.
    pub fn opens(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.opens)
    }
}

impl WatchBackend for ScriptedBackend {
    type Subscriber = FakeSubscriber;

    fn open(&mut self, roots: &[WatchRoot]) -> Result<WatchSet<FakeSubscriber>> {
        let index = {
            let mut opens = self.opens.lock().unwrap();
            *opens += 1;
            *opens - 1
        };

        let (tx, rx) = mpsc::unbounded_channel();
        for event in self.scripts.pop_front().unwrap_or_default() {
            tx.send(Ok(event)).unwrap();
        }

        let fail_on = match &self.fail_on {
            Some((i, root)) if *i == index => Some(root.clone()),
            _ => None,
        };

        let subscriber = FakeSubscriber {
            log: self.log.clone(),
            fail_on,
            _events_tx: tx,
        };
        WatchSet::open(subscriber, rx, roots)
    }
}

/// `notify` event for a file closed after writing.
pub fn close_write(path: &str) -> Event {
    Event::new(EventKind::Access(AccessKind::Close(AccessMode::Write))).add_path(path.into())
}

/// `notify` event for a created directory.
pub fn create_dir(path: &str) -> Event {
    Event::new(EventKind::Create(CreateKind::Folder)).add_path(path.into())
}

/// `notify` event for a created regular file.
pub fn create_file(path: &str) -> Event {
    Event::new(EventKind::Create(CreateKind::File)).add_path(path.into())
}

/// `notify` event for a removed file.
pub fn remove_file(path: &str) -> Event {
    Event::new(EventKind::Remove(RemoveKind::File)).add_path(path.into())
}

/// `notify` event for a removed directory.
pub fn remove_dir(path: &str) -> Event {
    Event::new(EventKind::Remove(RemoveKind::Folder)).add_path(path.into())
}
