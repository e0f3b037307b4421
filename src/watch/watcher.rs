// src/watch/watcher.rs

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::WatchSection;
use crate::engine::{RuntimeEvent, TriggerReason};
use crate::fs::FileSystem;
use crate::watch::event_handler::{debounce, first_relevant_path, is_relevant_kind, should_trigger};
use crate::watch::patterns::WatchProfile;
use crate::watch::tracker::SourceTracker;

/// Watcher settings derived from `[watch]`.
#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    pub debounce: Duration,
}

impl From<&WatchSection> for WatchOptions {
    fn from(section: &WatchSection) -> Self {
        Self {
            debounce: Duration::from_millis(section.debounce_ms),
        }
    }
}

/// Handle for the filesystem watcher.
///
/// Keeps the underlying `RecommendedWatcher` alive; dropping this handle
/// stops file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher on `root` (the source directory) that sends
/// `RuntimeEvent::BuildTriggered` whenever a file matching `profile` changes.
///
/// With a `tracker`, saves that leave the sources as the last build saw them
/// are skipped. Sources edited between that build and the watcher starting
/// trigger a rebuild right away.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    profile: WatchProfile,
    options: WatchOptions,
    fs: Arc<dyn FileSystem>,
    tracker: Option<Arc<SourceTracker>>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let root = root.into();
    let root = fs.canonicalize(&root).unwrap_or(root);

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    // tracing may already be torn down here.
                    eprintln!("stylewatch: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("stylewatch: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    let mode = if profile.recursive() {
        RecursiveMode::Recursive
    } else {
        RecursiveMode::NonRecursive
    };
    watcher
        .watch(&root, mode)
        .with_context(|| format!("watching {:?}", root))?;

    info!(?root, recursive = profile.recursive(), "file watcher started");

    tokio::spawn(async move {
        if tracker.is_some() && should_trigger(tracker.clone(), "(startup)".to_string()).await {
            info!("sources changed since the last build; requesting rebuild");
            if runtime_tx.send(file_watch_trigger()).await.is_err() {
                return;
            }
        }

        while let Some(event) = event_rx.recv().await {
            debug!(?event, "received notify event");

            if !is_relevant_kind(&event.kind) {
                continue;
            }
            let Some(rel) = first_relevant_path(&root, &event.paths, &profile) else {
                continue;
            };

            let folded = debounce(&mut event_rx, options.debounce).await;
            debug!(path = %rel, folded, "change detected");

            if !should_trigger(tracker.clone(), rel.clone()).await {
                continue;
            }

            info!(path = %rel, "source changed; requesting rebuild");
            if let Err(err) = runtime_tx.send(file_watch_trigger()).await {
                warn!("failed to send RuntimeEvent::BuildTriggered: {err}");
                // The runtime is gone; stop watching.
                return;
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}

fn file_watch_trigger() -> RuntimeEvent {
    RuntimeEvent::BuildTriggered {
        reason: TriggerReason::FileWatch,
    }
}
