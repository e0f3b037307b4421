// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Compiling the `[watch]` glob patterns (relative to the source dir).
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//! - Folding bursts of events into one trigger (debounce).
//! - Optionally hashing watched content so that a save without changes
//!   does not cause a rebuild. [`SourceTracker`] keeps the hash of what the
//!   last build compiled; the compile backend updates it.
//!
//! It does **not** know about builds; it only turns filesystem changes into
//! `RuntimeEvent::BuildTriggered`.

pub mod event_handler;
pub mod hash;
pub mod path_utils;
pub mod patterns;
pub mod tracker;
pub mod watcher;

pub use hash::{compute_file_hash, compute_hash_for_paths, ChangeDetector};
pub use patterns::{collect_matching_files, WatchProfile};
pub use tracker::SourceTracker;
pub use watcher::{spawn_watcher, WatchOptions, WatcherHandle};
