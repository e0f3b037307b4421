// src/watch/tracker.rs

//! Tracks which state of the watched sources the output was built from.
//!
//! The compile backend records the sources right before each build; the
//! watcher asks whether the current sources differ from that. One tracker
//! is shared by the `css` step and the `watch` step of a run.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::ResolvedConfig;
use crate::fs::FileSystem;
use crate::watch::hash::{compute_hash_for_paths, ChangeDetector};
use crate::watch::patterns::{collect_matching_files, WatchProfile};

#[derive(Debug)]
pub struct SourceTracker {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
    profile: WatchProfile,
    detector: Mutex<ChangeDetector>,
}

impl SourceTracker {
    pub fn new(fs: Arc<dyn FileSystem>, root: &Path, profile: WatchProfile) -> Self {
        let root = fs.canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        Self {
            fs,
            root,
            profile,
            detector: Mutex::new(ChangeDetector::new()),
        }
    }

    /// Tracker for `cfg`'s source directory, or `None` when `[watch].use_hash`
    /// is off.
    pub fn for_config(cfg: &ResolvedConfig, fs: Arc<dyn FileSystem>) -> Result<Option<Arc<Self>>> {
        if !cfg.watch.use_hash {
            return Ok(None);
        }
        let profile = WatchProfile::from_section(&cfg.watch)?;
        Ok(Some(Arc::new(Self::new(fs, &cfg.source_dir, profile))))
    }

    /// Aggregate hash of every file the profile matches under the root.
    pub fn current_hash(&self) -> Result<String> {
        let files = collect_matching_files(self.fs.as_ref(), &self.root, &self.profile)?;
        compute_hash_for_paths(self.fs.as_ref(), files)
    }

    /// Record the sources a build is about to compile.
    pub fn record_build(&self) {
        match self.current_hash() {
            Ok(hash) => {
                debug!(hash = %hash, "recorded sources for build");
                self.detector().record_build(hash);
            }
            Err(err) => {
                warn!(error = %err, "could not hash sources before build");
                self.detector().forget();
            }
        }
    }

    /// Whether the sources differ from what the last build compiled.
    ///
    /// Errors while hashing count as a change.
    pub fn has_changed(&self) -> bool {
        match self.current_hash() {
            Ok(hash) => self.detector().is_stale(&hash),
            Err(err) => {
                warn!(error = %err, "failed to hash watched files; rebuilding anyway");
                true
            }
        }
    }

    fn detector(&self) -> MutexGuard<'_, ChangeDetector> {
        self.detector.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WatchSection;
    use crate::fs::mock::MockFileSystem;

    fn tracker(mock: &MockFileSystem) -> SourceTracker {
        let profile = WatchProfile::from_section(&WatchSection::default()).unwrap();
        SourceTracker::new(Arc::new(mock.clone()), Path::new("scss"), profile)
    }

    #[test]
    fn nothing_built_yet_counts_as_changed() {
        let mock = MockFileSystem::new();
        mock.add_file("scss/bundle.scss", ".a{}");
        assert!(tracker(&mock).has_changed());
    }

    #[test]
    fn identical_save_after_a_build_is_not_a_change() {
        let mock = MockFileSystem::new();
        mock.add_file("scss/bundle.scss", ".a{}");
        let t = tracker(&mock);

        t.record_build();
        mock.add_file("scss/bundle.scss", ".a{}");
        assert!(!t.has_changed());

        // Files outside the patterns are not tracked.
        mock.add_file("scss/notes.txt", "x");
        assert!(!t.has_changed());
    }

    #[test]
    fn unbuilt_change_stays_visible_across_saves() {
        let mock = MockFileSystem::new();
        mock.add_file("scss/bundle.scss", ".a{}");
        let t = tracker(&mock);
        t.record_build();

        // First save: its trigger may be dropped while a build runs.
        mock.add_file("scss/bundle.scss", ".a{color:red}");
        assert!(t.has_changed());
        // Re-saving the same content must still trigger.
        mock.add_file("scss/bundle.scss", ".a{color:red}");
        assert!(t.has_changed());

        t.record_build();
        assert!(!t.has_changed());
    }

    #[test]
    fn reverting_to_the_built_content_is_not_a_change() {
        let mock = MockFileSystem::new();
        mock.add_file("scss/bundle.scss", ".a{}");
        let t = tracker(&mock);
        t.record_build();

        mock.add_file("scss/bundle.scss", ".b{}");
        mock.add_file("scss/bundle.scss", ".a{}");
        assert!(!t.has_changed());
    }

    #[test]
    fn unreadable_root_forgets_the_baseline() {
        let mock = MockFileSystem::new();
        mock.add_file("scss/bundle.scss", ".a{}");
        let t = tracker(&mock);
        t.record_build();

        mock.remove_file("scss/bundle.scss");
        t.record_build();
        mock.add_file("scss/bundle.scss", ".a{}");
        assert!(t.has_changed());
    }
}
