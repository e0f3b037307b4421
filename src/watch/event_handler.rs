// src/watch/event_handler.rs

//! Turning raw `notify` events into rebuild triggers.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Event, EventKind};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::watch::path_utils::relative_str;
use crate::watch::patterns::WatchProfile;
use crate::watch::tracker::SourceTracker;

/// Access events (open/close without write) never change content.
pub fn is_relevant_kind(kind: &EventKind) -> bool {
    !matches!(kind, EventKind::Access(_))
}

/// First path in `paths` that the profile cares about, relative to `root`.
pub fn first_relevant_path(root: &Path, paths: &[PathBuf], profile: &WatchProfile) -> Option<String> {
    paths.iter().find_map(|path| {
        let rel = match relative_str(root, path) {
            Some(rel) => rel,
            None => {
                debug!(?path, ?root, "event path outside watch root");
                return None;
            }
        };
        profile.matches(&rel).then_some(rel)
    })
}

/// Swallow further events until `window` passes without one.
///
/// Returns how many events were folded in.
pub async fn debounce(rx: &mut mpsc::UnboundedReceiver<Event>, window: Duration) -> usize {
    if window.is_zero() {
        return 0;
    }

    let mut folded = 0;
    while let Ok(Some(_event)) = timeout(window, rx.recv()).await {
        folded += 1;
    }
    folded
}

/// Decide whether a change should trigger a rebuild.
///
/// Without a tracker this is always true. With one, the watched files must
/// differ from what the last build compiled.
pub async fn should_trigger(tracker: Option<Arc<SourceTracker>>, rel_path: String) -> bool {
    let Some(tracker) = tracker else {
        return true;
    };

    tokio::task::spawn_blocking(move || {
        if tracker.has_changed() {
            true
        } else {
            info!(path = %rel_path, "watched content unchanged; skipping rebuild");
            false
        }
    })
    .await
    .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WatchSection;
    use crate::fs::mock::MockFileSystem;

    fn profile() -> WatchProfile {
        WatchProfile::from_section(&WatchSection::default()).unwrap()
    }

    #[test]
    fn access_events_are_ignored() {
        use notify::event::{AccessKind, ModifyKind};
        assert!(!is_relevant_kind(&EventKind::Access(AccessKind::Any)));
        assert!(is_relevant_kind(&EventKind::Modify(ModifyKind::Any)));
    }

    #[test]
    fn picks_first_matching_path() {
        let root = Path::new("/site/scss");
        let paths = vec![
            PathBuf::from("/site/scss/notes.txt"),
            PathBuf::from("/site/scss/_nav.scss"),
        ];
        assert_eq!(
            first_relevant_path(root, &paths, &profile()).as_deref(),
            Some("_nav.scss")
        );
    }

    #[tokio::test]
    async fn debounce_folds_queued_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        for _ in 0..3 {
            tx.send(Event::new(EventKind::Any)).unwrap();
        }
        let folded = debounce(&mut rx, Duration::from_millis(20)).await;
        assert_eq!(folded, 3);
    }

    #[tokio::test]
    async fn unchanged_content_is_skipped() {
        let mock = MockFileSystem::new();
        mock.add_file("scss/bundle.scss", ".a{}");
        let tracker = Arc::new(SourceTracker::new(
            Arc::new(mock.clone()),
            Path::new("scss"),
            profile(),
        ));
        tracker.record_build();

        assert!(!should_trigger(Some(Arc::clone(&tracker)), "bundle.scss".into()).await);

        mock.add_file("scss/bundle.scss", ".a{color:red}");
        assert!(should_trigger(Some(tracker), "bundle.scss".into()).await);
    }

    #[tokio::test]
    async fn without_tracker_every_change_triggers() {
        assert!(should_trigger(None, "bundle.scss".into()).await);
    }
}
