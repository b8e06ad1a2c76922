use std::sync::Arc;

use rbt_model::{InstanceId, OutcomeStatus};
use tracing::{debug, error, info, instrument, warn};

use crate::control::InstanceControl;
use crate::verifier::{Action, Event, RetryPolicy, Verifier};

/// Runs the verifier state machine for one server against a live controller.
#[derive(Clone)]
pub struct RestartVerifier {
    control: Arc<dyn InstanceControl>,
    policy: RetryPolicy,
}

impl RestartVerifier {
    pub fn new(control: Arc<dyn InstanceControl>, policy: RetryPolicy) -> Self {
        Self { control, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Restart `id` and return the final observed status.
    ///
    /// Never fails: a rejected restart is logged and checking continues, a failed
    /// status query becomes [`OutcomeStatus::Failed`], an unresolved label becomes
    /// [`OutcomeStatus::NotFound`] without touching the controller.
    #[instrument(level = "info", name = "server", skip_all, fields(server = %server))]
    pub async fn verify(&self, server: &str, id: Option<&InstanceId>) -> OutcomeStatus {
        let mut machine = Verifier::new(&self.policy, id.cloned());
        let mut event = Event::Start;

        loop {
            let action = match machine.handle(event) {
                Ok(action) => action,
                Err(e) => {
                    error!(error = %e, "verifier stopped unexpectedly");
                    return OutcomeStatus::Failed;
                }
            };

            event = match action {
                Action::Restart(id) => {
                    info!(instance = %id, "restarting server");
                    match self.control.restart(&id).await {
                        Ok(()) => debug!(instance = %id, "restart accepted"),
                        Err(e) => warn!(instance = %id, error = %e, "restart not accepted; checking status anyway"),
                    }
                    Event::RestartIssued
                }
                Action::Sleep(delay) => {
                    debug!(delay_secs = delay.as_secs(), checks = machine.checks(), "waiting before status check");
                    tokio::time::sleep(delay).await;
                    Event::DelayElapsed
                }
                Action::QueryStatus(id) => {
                    let status = match self.control.status(&id).await {
                        Ok(s) => OutcomeStatus::Reported(s),
                        Err(e) => {
                            warn!(instance = %id, error = %e, "status query failed");
                            OutcomeStatus::Failed
                        }
                    };
                    if machine.checks() == 1 && self.policy.needs_recheck(&status) {
                        info!(
                            status = %status,
                            recheck_in_secs = self.policy.second_check_delay.as_secs(),
                            "instance not settled after first check"
                        );
                    }
                    Event::StatusObserved(status)
                }
                Action::Finish(status) => {
                    match &status {
                        OutcomeStatus::NotFound => warn!("no instance with this label"),
                        s => info!(status = %s, checks = machine.checks(), "verification finished"),
                    }
                    return status;
                }
            };
        }
    }
}
