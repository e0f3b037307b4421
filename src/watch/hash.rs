// src/watch/hash.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blake3::Hasher;
use tracing::debug;

use crate::fs::FileSystem;

/// Compute the hash of a single file.
pub fn compute_file_hash(fs: &dyn FileSystem, path: &Path) -> Result<String> {
    let bytes = fs
        .read(path)
        .with_context(|| format!("reading file for hashing: {:?}", path))?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

/// Compute a deterministic hash over the names and contents of `paths`.
///
/// Order of `paths` does not matter; they are sorted first. The path is part
/// of the hash so that renaming a partial counts as a change.
pub fn compute_hash_for_paths<I, P>(fs: &dyn FileSystem, paths: I) -> Result<String>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut paths_vec: Vec<PathBuf> = paths
        .into_iter()
        .map(|p| p.as_ref().to_path_buf())
        .collect();
    paths_vec.sort();

    let mut hasher = Hasher::new();
    for path in paths_vec {
        let file_hash = compute_file_hash(fs, &path)?;
        hasher.update(path.to_string_lossy().as_bytes());
        hasher.update(b"\0");
        hasher.update(file_hash.as_bytes());
    }

    let hash = hasher.finalize().to_hex().to_string();
    debug!(hash = %hash, "computed aggregate hash");
    Ok(hash)
}

/// Remembers the aggregate hash of the sources the last build compiled.
///
/// Triggers are compared against that, not against earlier triggers, so a
/// change whose trigger got dropped still counts until a build picks it up.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    built: Option<String>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A build is about to compile sources hashing to `hash`.
    pub fn record_build(&mut self, hash: String) {
        self.built = Some(hash);
    }

    /// Forget the baseline; everything counts as changed until the next build.
    pub fn forget(&mut self) {
        self.built = None;
    }

    /// True unless `hash` is exactly what the last build compiled.
    pub fn is_stale(&self, hash: &str) -> bool {
        self.built.as_deref() != Some(hash)
    }
}
