// src/watch/event.rs

//! Filesystem events as seen by the reaction loop.
//!
//! `notify` reports a rich set of event kinds; the loop only cares about
//! three of them, so everything else is dropped at this boundary.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use notify::event::{AccessKind, AccessMode, CreateKind};
use notify::{Event, EventKind};

/// Kind of a filesystem event relevant to the reaction loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsEventKind {
    /// An entry was created. `is_dir` carries the platform's answer when it
    /// gives one (`CreateKind::Folder` / `CreateKind::File`).
    Created { is_dir: Option<bool> },
    /// An entry (file or directory) was removed.
    Deleted,
    /// A file that was opened for writing has been closed.
    ClosedAfterWrite,
}

/// A single event: its kind plus the directory and entry name it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEvent {
    pub kind: FsEventKind,
    pub dir: PathBuf,
    pub name: OsString,
}

impl FsEvent {
    pub fn new(kind: FsEventKind, dir: impl Into<PathBuf>, name: impl Into<OsString>) -> Self {
        Self {
            kind,
            dir: dir.into(),
            name: name.into(),
        }
    }

    /// Build an event from a full path, splitting it into directory + name.
    pub fn at(kind: FsEventKind, path: &Path) -> Self {
        match (path.parent(), path.file_name()) {
            (Some(dir), Some(name)) => Self::new(kind, dir, name),
            // Filesystem roots have no parent/name split.
            _ => Self::new(kind, path, OsString::new()),
        }
    }

    /// Full path of the entry the event refers to.
    pub fn target(&self) -> PathBuf {
        if self.name.is_empty() {
            self.dir.clone()
        } else {
            self.dir.join(&self.name)
        }
    }

    /// Translate a `notify` event into zero or more loop events (one per path).
    ///
    /// `ClosedAfterWrite` comes from `AccessKind::Close(AccessMode::Write)`,
    /// which only the inotify backend (Linux) reports. On macOS and Windows
    /// structural events still arrive but no reaction ever fires.
    pub fn from_notify(event: &Event) -> Vec<FsEvent> {
        let kind = match event.kind {
            EventKind::Create(CreateKind::Folder) => FsEventKind::Created { is_dir: Some(true) },
            EventKind::Create(CreateKind::File) => FsEventKind::Created { is_dir: Some(false) },
            EventKind::Create(_) => FsEventKind::Created { is_dir: None },
            EventKind::Remove(_) => FsEventKind::Deleted,
            EventKind::Access(AccessKind::Close(AccessMode::Write)) => FsEventKind::ClosedAfterWrite,
            _ => return Vec::new(),
        };

        event.paths.iter().map(|p| FsEvent::at(kind, p)).collect()
    }
}
