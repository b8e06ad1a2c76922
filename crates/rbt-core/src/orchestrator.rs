use std::sync::Arc;

use rbt_model::{Batch, BatchReport, Clock, Outcome};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::{
    BatchSource, Directory, InstanceControl, InstanceDirectory, Reporter, RestartVerifier,
    RetryPolicy,
};

/// Runs batches one after another, servers strictly in order.
///
/// Never more than one instance is rebooting at a time.
pub struct BatchOrchestrator {
    directory: Arc<dyn InstanceDirectory>,
    verifier: RestartVerifier,
    reporter: Arc<dyn Reporter>,
    clock: Clock,
}

impl BatchOrchestrator {
    pub fn new(
        directory: Arc<dyn InstanceDirectory>,
        control: Arc<dyn InstanceControl>,
        policy: RetryPolicy,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            directory,
            verifier: RestartVerifier::new(control, policy),
            reporter,
            clock: Clock::default(),
        }
    }

    /// Stamp outcomes with `clock` instead of UTC.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Restart and verify every server of `batch`, then hand the outcomes to the reporter.
    ///
    /// Produces exactly one outcome per server, in batch order.
    #[instrument(
        level = "info",
        name = "batch",
        skip_all,
        fields(batch = %batch.name(), run_id = %Uuid::new_v4())
    )]
    pub async fn run_batch(&self, batch: &Batch) -> BatchReport {
        info!(servers = batch.len(), "processing batch");
        let directory = Directory::snapshot(self.directory.as_ref()).await;

        let mut outcomes = Vec::with_capacity(batch.len());
        for server in batch.servers() {
            let status = self.verifier.verify(server, directory.resolve(server)).await;
            outcomes.push(Outcome::stamped(&self.clock, server.as_str(), status));
        }

        let active = outcomes.iter().filter(|o| o.status.is_active()).count();
        info!(servers = outcomes.len(), active, "batch finished");

        let report = BatchReport::new(batch.name(), outcomes);
        self.reporter.report(&report).await;
        report
    }

    /// Load and run each named batch in turn.
    ///
    /// A batch that cannot be loaded is skipped; the remaining batches still run.
    pub async fn run_all(&self, source: &dyn BatchSource, names: &[String]) -> Vec<BatchReport> {
        let mut reports = Vec::with_capacity(names.len());
        for name in names {
            info!(batch = %name, "loading batch");
            match source.load(name).await {
                Ok(batch) => reports.push(self.run_batch(&batch).await),
                Err(e) => error!(batch = %name, error = %e, "skipping batch"),
            }
        }
        reports
    }
}
