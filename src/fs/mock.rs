// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(String),
    Dir,
}

/// In-memory filesystem for tests.
///
/// Entries are keyed by their full path; parents are not tracked, which is
/// all the classifier and the config loader need.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(path.as_ref().to_path_buf(), MockEntry::File(content.into()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(path.as_ref().to_path_buf(), MockEntry::Dir);
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(path.as_ref());
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let entries = self.entries.lock().unwrap();
        match entries.get(path) {
            Some(MockEntry::File(content)) => Ok(content.clone()),
            Some(MockEntry::Dir) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        let entries = self.entries.lock().unwrap();
        matches!(entries.get(path), Some(MockEntry::Dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_directory_is_no_longer_a_directory() {
        let fs = MockFileSystem::new();
        fs.add_dir("/w/sub");
        assert!(fs.is_dir(Path::new("/w/sub")));

        fs.remove("/w/sub");
        assert!(!fs.is_dir(Path::new("/w/sub")));
    }

    #[test]
    fn read_to_string_rejects_directories() {
        let fs = MockFileSystem::new();
        fs.add_dir("/w");
        fs.add_file("/w/a.toml", "paths = [\"/w\"]");

        assert!(fs.read_to_string(Path::new("/w")).is_err());
        assert_eq!(
            fs.read_to_string(Path::new("/w/a.toml")).unwrap(),
            "paths = [\"/w\"]"
        );
    }
}
