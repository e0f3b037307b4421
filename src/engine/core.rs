// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`RuntimeEvent`]s and produces:
//! - an updated core state
//! - a list of "commands" describing what the IO shell should do next
//!
//! The core is tested without any Tokio, channels, filesystem, or compiler.

use crate::engine::handlers::{
    handle_build_finished, handle_build_trigger, handle_shutdown, BuildState, CoreState, CoreStep,
};
use crate::engine::queue::TriggerQueue;
use crate::engine::{RunSummary, RuntimeEvent, RuntimeOptions};
use crate::types::TriggerWhileRunningBehaviour;

/// Pure core runtime state.
///
/// It has **no** channels, no Tokio types, and does not perform any IO.
#[derive(Debug)]
pub struct CoreRuntime {
    state: CoreState,
    options: RuntimeOptions,
}

impl CoreRuntime {
    pub fn new(
        behaviour: TriggerWhileRunningBehaviour,
        queue_length: usize,
        options: RuntimeOptions,
    ) -> Self {
        let queue = TriggerQueue::new(behaviour, queue_length);
        Self {
            state: CoreState::new(queue),
            options,
        }
    }

    /// True when no build is in flight.
    pub fn is_idle(&self) -> bool {
        self.state.build == BuildState::Idle
    }

    pub fn queue_is_empty(&self) -> bool {
        self.state.queue.is_empty()
    }

    pub fn summary(&self) -> &RunSummary {
        &self.state.summary
    }

    /// Handle a single runtime event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::BuildTriggered { reason } => handle_build_trigger(&mut self.state, reason),
            RuntimeEvent::BuildFinished { run_id, report } => {
                handle_build_finished(&mut self.state, &self.options, run_id, report)
            }
            RuntimeEvent::ShutdownRequested => handle_shutdown(&mut self.state),
        }
    }
}
