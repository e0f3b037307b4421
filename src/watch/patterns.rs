// src/watch/patterns.rs

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::config::WatchSection;
use crate::fs::FileSystem;

/// Compiled `[watch]` patterns.
///
/// Patterns are relative to the source directory; the watcher passes
/// relative paths like `"_variables.scss"` into [`WatchProfile::matches`].
/// `*` does not cross `/`, so nested files need `**` (and `recursive = true`).
#[derive(Clone)]
pub struct WatchProfile {
    watch_set: GlobSet,
    exclude_set: Option<GlobSet>,
    recursive: bool,
}

impl fmt::Debug for WatchProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchProfile")
            .field("recursive", &self.recursive)
            .finish_non_exhaustive()
    }
}

impl WatchProfile {
    pub fn from_section(section: &WatchSection) -> Result<Self> {
        let watch_set = build_globset(&section.patterns).context("building watch globset")?;
        let exclude_set = if section.exclude.is_empty() {
            None
        } else {
            Some(build_globset(&section.exclude).context("building exclude globset")?)
        };

        Ok(Self {
            watch_set,
            exclude_set,
            recursive: section.recursive,
        })
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    /// Returns true if a change to `rel_path` (relative to the source dir)
    /// should trigger a rebuild.
    pub fn matches(&self, rel_path: &str) -> bool {
        if rel_path.is_empty() {
            return false;
        }
        if !self.recursive && rel_path.contains('/') {
            return false;
        }
        if !self.watch_set.is_match(rel_path) {
            return false;
        }
        if let Some(exclude) = &self.exclude_set {
            if exclude.is_match(rel_path) {
                return false;
            }
        }
        true
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = GlobBuilder::new(pat)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Collect all files under `root` that `profile` matches, sorted.
///
/// Only descends into subdirectories when the profile is recursive.
pub fn collect_matching_files(
    fs: &dyn FileSystem,
    root: &Path,
    profile: &WatchProfile,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir)? {
            if fs.is_dir(&path) {
                if profile.recursive() {
                    stack.push(path);
                }
            } else if fs.is_file(&path) {
                if let Ok(rel) = path.strip_prefix(root) {
                    let rel_str = rel.to_string_lossy().replace('\\', "/");
                    if profile.matches(&rel_str) {
                        files.push(path);
                    }
                }
            }
        }
    }

    files.sort();
    Ok(files)
}
