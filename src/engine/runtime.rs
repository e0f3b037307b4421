// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::{Result, StylewatchError};
use crate::exec::CompileBackend;
use crate::notifier::Notifier;

use super::core::CoreRuntime;
use super::{CoreCommand, RunSummary, RuntimeEvent};

/// Drives the build state machine in response to `RuntimeEvent`s and
/// delegates builds to a `CompileBackend` and failures to a `Notifier`.
///
/// All semantics live in `CoreRuntime`; this struct only does IO.
pub struct Runtime<B: CompileBackend> {
    core: CoreRuntime,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    backend: B,
    notifier: Arc<dyn Notifier>,
}

impl<B: CompileBackend> fmt::Debug for Runtime<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

impl<B: CompileBackend> Runtime<B> {
    pub fn new(
        core: CoreRuntime,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        backend: B,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            core,
            event_rx,
            backend,
            notifier,
        }
    }

    /// Main event loop.
    ///
    /// Returns the build counters once the core asks to stop or the event
    /// channel closes; returns an error if a build aborted.
    pub async fn run(mut self) -> Result<RunSummary> {
        info!("stylewatch runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command).await?;
            }

            if !step.keep_running {
                debug!("core requested exit; stopping runtime");
                break;
            }
        }

        let summary = self.core.summary().clone();
        info!(builds = summary.builds, failures = summary.failures, "runtime exiting");
        Ok(summary)
    }

    async fn execute_command(&mut self, command: CoreCommand) -> Result<()> {
        match command {
            CoreCommand::StartBuild(request) => {
                debug!(run_id = request.run_id, reason = ?request.reason, "dispatching build");
                self.backend.start_build(request).await?;
            }
            CoreCommand::NotifyFailure(err) => {
                let message = err.notification_message();
                if let Err(e) = self.notifier.notify(&message) {
                    warn!(error = %e, "failed to deliver notification");
                }
            }
            CoreCommand::Abort(msg) => {
                return Err(StylewatchError::Other(anyhow!("build aborted: {msg}")));
            }
            CoreCommand::RequestExit => {
                debug!("core issued RequestExit command");
            }
        }
        Ok(())
    }
}
