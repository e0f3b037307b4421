use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use stylewatch::engine::{BuildReport, BuildRequest, RuntimeEvent};
use stylewatch::errors::Result;
use stylewatch::exec::CompileBackend;
use stylewatch::pipeline::{BuildOutcome, CssArtifact, WriteStatus};
use tokio::sync::mpsc;

/// A fake backend that:
/// - records every build request
/// - answers each one with the next scripted report (success once the
///   script runs out)
/// - optionally injects extra runtime events right after the first build
///   starts, to simulate changes arriving mid-build.
pub struct FakeBackend {
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    requests: Arc<Mutex<Vec<BuildRequest>>>,
    script: VecDeque<BuildReport>,
    during_first_build: Vec<RuntimeEvent>,
}

impl FakeBackend {
    pub fn new(
        runtime_tx: mpsc::Sender<RuntimeEvent>,
        requests: Arc<Mutex<Vec<BuildRequest>>>,
    ) -> Self {
        Self {
            runtime_tx,
            requests,
            script: VecDeque::new(),
            during_first_build: Vec::new(),
        }
    }

    /// Queue the report returned for the next build.
    pub fn then(mut self, report: BuildReport) -> Self {
        self.script.push_back(report);
        self
    }

    /// Events delivered while the first build is still "running".
    pub fn while_first_build_runs(mut self, events: Vec<RuntimeEvent>) -> Self {
        self.during_first_build = events;
        self
    }
}

/// A successful build report for `code`.
pub fn built(code: &str) -> BuildReport {
    BuildReport::Finished(BuildOutcome::Built {
        artifact: CssArtifact::new(code.to_string()),
        status: WriteStatus::Written,
    })
}

impl CompileBackend for FakeBackend {
    fn start_build(
        &mut self,
        request: BuildRequest,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let tx = self.runtime_tx.clone();
        let report = self.script.pop_front().unwrap_or_else(|| built(".ok{}"));
        let extra = std::mem::take(&mut self.during_first_build);
        let requests = Arc::clone(&self.requests);

        Box::pin(async move {
            requests.lock().unwrap().push(request);

            for event in extra {
                tx.send(event).await.map_err(anyhow::Error::from)?;
            }

            tx.send(RuntimeEvent::BuildFinished {
                run_id: request.run_id,
                report,
            })
            .await
            .map_err(anyhow::Error::from)?;
            Ok(())
        })
    }
}
