// src/fs/mock.rs

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{anyhow, Result};

use super::FileSystem;

#[derive(Debug, Default)]
struct Tree {
    files: BTreeMap<PathBuf, Vec<u8>>,
    writes: usize,
}

/// In-memory filesystem for tests.
///
/// Only files are stored; a directory exists when some file lives below it.
/// `./scss/a.scss` and `scss/a.scss` name the same file.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    tree: Arc<Mutex<Tree>>,
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn tree(&self) -> MutexGuard<'_, Tree> {
        self.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create or replace a file. Does not count as a write.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.tree()
            .files
            .insert(normalize(path.as_ref()), content.into());
    }

    pub fn remove_file(&self, path: impl AsRef<Path>) {
        self.tree().files.remove(&normalize(path.as_ref()));
    }

    /// Number of [`FileSystem::write`] calls so far.
    pub fn writes(&self) -> usize {
        self.tree().writes
    }
}

impl FileSystem for MockFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let key = normalize(path);
        if let Some(content) = self.tree().files.get(&key) {
            return Ok(content.clone());
        }
        if self.is_dir(path) {
            Err(anyhow!("{:?} is a directory", path))
        } else {
            Err(anyhow!("no such file: {:?}", path))
        }
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        String::from_utf8(self.read(path)?).map_err(|e| anyhow!("{:?} is not UTF-8: {e}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let mut tree = self.tree();
        tree.files.insert(normalize(path), contents.to_vec());
        tree.writes += 1;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.tree().files.contains_key(&normalize(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let dir = normalize(path);
        self.tree()
            .files
            .keys()
            .any(|file| file != &dir && file.starts_with(&dir))
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        if self.exists(path) {
            Ok(normalize(path))
        } else {
            Err(anyhow!("no such file or directory: {:?}", path))
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let dir = normalize(path);
        let children: BTreeSet<PathBuf> = self
            .tree()
            .files
            .keys()
            .filter_map(|file| file.strip_prefix(&dir).ok())
            .filter_map(|rest| rest.components().next())
            .map(|first| path.join(first.as_os_str()))
            .collect();

        if children.is_empty() {
            return Err(anyhow!("not a directory: {:?}", path));
        }
        Ok(children.into_iter().collect())
    }
}
