// src/engine/core.rs

//! Pure event classification.
//!
//! Decides, for one [`FsEvent`], whether the watch set has to be rebuilt, the
//! reaction has to run, or nothing happens. No channels, no Tokio types, no
//! processes; the only outside input is a [`FileSystem`] stat for creations
//! the platform did not label.

use tracing::trace;

use crate::engine::Classification;
use crate::fs::FileSystem;
use crate::watch::{FsEvent, FsEventKind, MatchPredicate};

/// Classify a single event. Rules are checked in order, first match wins:
///
/// 1. created directory -> structural
/// 2. any deletion -> structural
/// 3. write-close of a path accepted by `predicate` -> react
/// 4. anything else -> ignore
pub fn classify(
    event: &FsEvent,
    predicate: &MatchPredicate,
    fs: &dyn FileSystem,
) -> Classification {
    match event.kind {
        FsEventKind::Created { is_dir } => {
            let target = event.target();
            // The stat is racy (the entry may already be gone); only used
            // when the backend did not say what was created.
            let is_dir = is_dir.unwrap_or_else(|| fs.is_dir(&target));
            if is_dir {
                Classification::Structural
            } else {
                trace!(path = ?target, "created file ignored");
                Classification::Ignore
            }
        }
        FsEventKind::Deleted => Classification::Structural,
        FsEventKind::ClosedAfterWrite => {
            let target = event.target();
            if predicate.is_match(&target) {
                Classification::React(target)
            } else {
                trace!(path = ?target, "write does not match predicate");
                Classification::Ignore
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use std::path::PathBuf;

    fn txt() -> MatchPredicate {
        MatchPredicate::from_glob("*.txt").unwrap()
    }

    #[test]
    fn created_directory_is_structural() {
        let fs = MockFileSystem::new();
        let ev = FsEvent::new(FsEventKind::Created { is_dir: Some(true) }, "/a", "sub");
        assert_eq!(classify(&ev, &txt(), &fs), Classification::Structural);
    }

    #[test]
    fn created_file_is_ignored_even_if_it_matches() {
        let fs = MockFileSystem::new();
        let ev = FsEvent::new(FsEventKind::Created { is_dir: Some(false) }, "/a", "x.txt");
        assert_eq!(classify(&ev, &txt(), &fs), Classification::Ignore);
    }

    #[test]
    fn unlabelled_creation_falls_back_to_stat() {
        let fs = MockFileSystem::new();
        fs.add_dir("/a/sub");
        fs.add_file("/a/f.txt", "");

        let dir = FsEvent::new(FsEventKind::Created { is_dir: None }, "/a", "sub");
        let file = FsEvent::new(FsEventKind::Created { is_dir: None }, "/a", "f.txt");
        let gone = FsEvent::new(FsEventKind::Created { is_dir: None }, "/a", "vanished");

        assert_eq!(classify(&dir, &txt(), &fs), Classification::Structural);
        assert_eq!(classify(&file, &txt(), &fs), Classification::Ignore);
        assert_eq!(classify(&gone, &txt(), &fs), Classification::Ignore);
    }

    #[test]
    fn platform_label_wins_over_stat() {
        let fs = MockFileSystem::new();
        fs.add_dir("/a/sub");
        let ev = FsEvent::new(FsEventKind::Created { is_dir: Some(false) }, "/a", "sub");
        assert_eq!(classify(&ev, &txt(), &fs), Classification::Ignore);
    }

    #[test]
    fn deletion_is_structural_regardless_of_predicate() {
        let fs = MockFileSystem::new();
        let matching = FsEvent::new(FsEventKind::Deleted, "/a", "x.txt");
        let other = FsEvent::new(FsEventKind::Deleted, "/a", "x.log");
        assert_eq!(classify(&matching, &txt(), &fs), Classification::Structural);
        assert_eq!(classify(&other, &txt(), &fs), Classification::Structural);
    }

    #[test]
    fn write_close_reacts_iff_predicate_matches() {
        let fs = MockFileSystem::new();
        let hit = FsEvent::new(FsEventKind::ClosedAfterWrite, "/a/b", "note.txt");
        let miss = FsEvent::new(FsEventKind::ClosedAfterWrite, "/a/b", "note.log");

        assert_eq!(
            classify(&hit, &txt(), &fs),
            Classification::React(PathBuf::from("/a/b/note.txt"))
        );
        assert_eq!(classify(&miss, &txt(), &fs), Classification::Ignore);
    }
}
