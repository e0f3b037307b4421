// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::Path;

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// - First we try a direct `strip_prefix(root)`.
/// - If that fails (symlinks, `/private/var` vs `/var` on macOS, ...), we
///   canonicalize both paths and try again. A file that was just deleted
///   cannot be canonicalized, so in that case only its parent is.
///
/// Returns `None` if the path is not under `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(to_slash(rel));
    }

    let root_canon = root.canonicalize().ok()?;
    let path_canon = path.canonicalize().ok().or_else(|| {
        let parent = path.parent()?.canonicalize().ok()?;
        Some(parent.join(path.file_name()?))
    })?;

    path_canon
        .strip_prefix(&root_canon)
        .ok()
        .map(to_slash)
}

fn to_slash(rel: &Path) -> String {
    rel.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_prefix() {
        assert_eq!(
            relative_str(Path::new("/site/scss"), Path::new("/site/scss/_nav.scss")).as_deref(),
            Some("_nav.scss")
        );
    }

    #[test]
    fn outside_root_is_none() {
        assert_eq!(
            relative_str(Path::new("/site/scss"), Path::new("/elsewhere/a.scss")),
            None
        );
    }

    #[test]
    fn deleted_file_under_canonical_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let gone = dir.path().join("removed.scss");
        assert_eq!(relative_str(&root, &gone).as_deref(), Some("removed.scss"));
    }
}
