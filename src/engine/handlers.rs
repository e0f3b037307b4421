// src/engine/handlers.rs

//! Event handling logic for the core runtime.

use tracing::{debug, info, warn};

use crate::engine::queue::TriggerQueue;
use crate::engine::{BuildReport, BuildRequest, RunId, RunSummary, RuntimeOptions, TriggerReason};
use crate::errors::CompilationError;
use crate::pipeline::BuildOutcome;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreCommand {
    /// Hand this build to the backend.
    StartBuild(BuildRequest),
    /// Surface a compilation error through the notifier.
    NotifyFailure(CompilationError),
    /// Stop with an error.
    Abort(String),
    /// Stop normally.
    RequestExit,
}

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn continue_with(commands: Vec<CoreCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }

    fn stop_with(commands: Vec<CoreCommand>) -> Self {
        Self {
            commands,
            keep_running: false,
        }
    }
}

/// Whether a build is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Idle,
    Running(RunId),
}

/// Mutable state the handlers operate on.
#[derive(Debug)]
pub struct CoreState {
    pub build: BuildState,
    pub queue: TriggerQueue,
    pub next_run_id: RunId,
    /// Ctrl-C arrived mid-build; exit once it finishes.
    pub shutdown_pending: bool,
    pub summary: RunSummary,
}

impl CoreState {
    pub fn new(queue: TriggerQueue) -> Self {
        Self {
            build: BuildState::Idle,
            queue,
            next_run_id: 1,
            shutdown_pending: false,
            summary: RunSummary::default(),
        }
    }

    fn start_build(&mut self, reason: TriggerReason) -> CoreCommand {
        let run_id = self.next_run_id;
        self.next_run_id += 1;
        self.build = BuildState::Running(run_id);
        debug!(run_id, ?reason, "starting build");
        CoreCommand::StartBuild(BuildRequest { run_id, reason })
    }
}

/// Handle a rebuild trigger.
///
/// Idle: start a build. Running: defer to the queue policy.
pub fn handle_build_trigger(state: &mut CoreState, reason: TriggerReason) -> CoreStep {
    if state.shutdown_pending {
        debug!(?reason, "shutdown pending; ignoring trigger");
        return CoreStep::continue_with(Vec::new());
    }

    match state.build {
        BuildState::Idle => CoreStep::continue_with(vec![state.start_build(reason)]),
        BuildState::Running(run_id) => {
            let kept = state.queue.record_trigger(reason);
            debug!(run_id, kept, "trigger arrived while building");
            CoreStep::continue_with(Vec::new())
        }
    }
}

/// Handle the end of a build.
pub fn handle_build_finished(
    state: &mut CoreState,
    options: &RuntimeOptions,
    run_id: RunId,
    report: BuildReport,
) -> CoreStep {
    if state.build != BuildState::Running(run_id) {
        warn!(run_id, current = ?state.build, "ignoring completion of unknown build");
        return CoreStep::continue_with(Vec::new());
    }
    state.build = BuildState::Idle;

    let mut commands = Vec::new();

    match report {
        BuildReport::Finished(BuildOutcome::Built { artifact, .. }) => {
            state.summary.builds += 1;
            state.summary.last_digest = Some(artifact.digest);
        }
        BuildReport::Finished(BuildOutcome::Failed(err)) => {
            state.summary.builds += 1;
            state.summary.failures += 1;
            commands.push(CoreCommand::NotifyFailure(err));
        }
        BuildReport::Aborted(msg) => {
            commands.push(CoreCommand::Abort(msg));
            return CoreStep::stop_with(commands);
        }
    }

    if state.shutdown_pending {
        info!(run_id, "in-flight build finished; shutting down");
        commands.push(CoreCommand::RequestExit);
        return CoreStep::stop_with(commands);
    }

    if let Some(reason) = state.queue.take_next() {
        commands.push(state.start_build(reason));
        return CoreStep::continue_with(commands);
    }

    if options.exit_when_idle {
        commands.push(CoreCommand::RequestExit);
        return CoreStep::stop_with(commands);
    }

    CoreStep::continue_with(commands)
}

/// Handle Ctrl-C: exit now when idle, otherwise after the current build.
pub fn handle_shutdown(state: &mut CoreState) -> CoreStep {
    state.queue.clear();
    match state.build {
        BuildState::Idle => CoreStep::stop_with(vec![CoreCommand::RequestExit]),
        BuildState::Running(run_id) => {
            info!(run_id, "shutdown requested; waiting for the running build");
            state.shutdown_pending = true;
            CoreStep::continue_with(Vec::new())
        }
    }
}
