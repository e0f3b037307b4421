// src/exec/backend.rs

//! Pluggable compile backend abstraction.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::config::ResolvedConfig;
use crate::engine::{BuildReport, BuildRequest, RuntimeEvent};
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::pipeline;
use crate::watch::SourceTracker;

/// Trait abstracting how builds are executed.
///
/// Implementations must eventually send exactly one
/// `RuntimeEvent::BuildFinished` carrying the request's `run_id`.
pub trait CompileBackend: Send {
    /// Start the build; must not wait for it to finish.
    fn start_build(
        &mut self,
        request: BuildRequest,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Backend used in production: runs the pipeline on the blocking pool.
///
/// With a tracker, the sources are recorded right before each compile.
pub struct RealCompileBackend {
    config: Arc<ResolvedConfig>,
    fs: Arc<dyn FileSystem>,
    tracker: Option<Arc<SourceTracker>>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
}

impl RealCompileBackend {
    pub fn new(
        config: Arc<ResolvedConfig>,
        fs: Arc<dyn FileSystem>,
        tracker: Option<Arc<SourceTracker>>,
        runtime_tx: mpsc::Sender<RuntimeEvent>,
    ) -> Self {
        Self {
            config,
            fs,
            tracker,
            runtime_tx,
        }
    }
}

impl CompileBackend for RealCompileBackend {
    fn start_build(
        &mut self,
        request: BuildRequest,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let config = Arc::clone(&self.config);
        let fs = Arc::clone(&self.fs);
        let tracker = self.tracker.clone();
        let tx = self.runtime_tx.clone();

        Box::pin(async move {
            tokio::spawn(async move {
                let run_id = request.run_id;
                let joined = tokio::task::spawn_blocking(move || {
                    if let Some(tracker) = &tracker {
                        tracker.record_build();
                    }
                    pipeline::build(&config, fs.as_ref())
                })
                .await;

                let report = match joined {
                    Ok(Ok(outcome)) => BuildReport::Finished(outcome),
                    Ok(Err(err)) => {
                        error!(run_id, error = %err, "build failed fatally");
                        BuildReport::Aborted(err.to_string())
                    }
                    Err(join_err) => BuildReport::Aborted(format!("build task panicked: {join_err}")),
                };

                if tx.send(RuntimeEvent::BuildFinished { run_id, report }).await.is_err() {
                    debug!(run_id, "runtime gone before build finished");
                }
            });
            Ok(())
        })
    }
}
