// src/engine/mod.rs

//! Orchestration engine for stylewatch.
//!
//! A build is either running or not. This module decides what happens when
//! rebuild triggers arrive in either state:
//! - idle: start a build right away
//! - running: hand the trigger to the [`TriggerQueue`] (queue or drop)
//! - build finished: report failures, then start a queued rebuild if any
//!
//! The pure state machine lives in [`core`] (with the per-event logic in
//! [`handlers`]); the async/IO shell is implemented in [`runtime`].

use crate::pipeline::BuildOutcome;

pub mod core;
pub mod handlers;
pub mod queue;
pub mod runtime;

pub use core::CoreRuntime;
pub use handlers::{CoreCommand, CoreStep};
pub use queue::TriggerQueue;
pub use crate::types::TriggerWhileRunningBehaviour;
pub use runtime::Runtime;

/// Monotonic identifier of one build.
pub type RunId = u64;

/// Why a build was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    /// Requested directly (the `css` task, or startup).
    Manual,
    /// A watched source file changed.
    FileWatch,
}

/// Runtime options used by both the core and the async shell.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// If true, exit once no build is running and nothing is queued
    /// (one-shot `css` runs).
    pub exit_when_idle: bool,
}

/// A build the backend should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildRequest {
    pub run_id: RunId,
    pub reason: TriggerReason,
}

/// How a build ended, as reported by the backend.
#[derive(Debug, Clone)]
pub enum BuildReport {
    /// The pipeline ran; the outcome may still be a compilation failure.
    Finished(BuildOutcome),
    /// The pipeline hit an error it does not recover from (e.g. the output
    /// directory is not writable). The runtime stops.
    Aborted(String),
}

/// Events flowing into the runtime from the watcher, the backend and signals.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    BuildTriggered {
        reason: TriggerReason,
    },
    BuildFinished {
        run_id: RunId,
        report: BuildReport,
    },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Counters handed back when the runtime stops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Builds that ran to completion (successful or not).
    pub builds: usize,
    /// Builds that ended in a compilation error.
    pub failures: usize,
    /// Digest of the most recent successful artifact.
    pub last_digest: Option<String>,
}
