use std::time::Duration;

use rbt_model::{InstanceId, OutcomeStatus};

use crate::error::CoreError;
use crate::verifier::RetryPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifierState {
    /// Nothing done yet; `None` when the label did not resolve.
    Idle(Option<InstanceId>),
    Restarting(InstanceId),
    AwaitingFirstCheck(InstanceId),
    FirstChecked(InstanceId),
    AwaitingSecondCheck(InstanceId),
    SecondChecked(InstanceId),
    Terminal(OutcomeStatus),
}

impl VerifierState {
    pub fn name(&self) -> &'static str {
        match self {
            VerifierState::Idle(_) => "idle",
            VerifierState::Restarting(_) => "restarting",
            VerifierState::AwaitingFirstCheck(_) => "awaiting_first_check",
            VerifierState::FirstChecked(_) => "first_checked",
            VerifierState::AwaitingSecondCheck(_) => "awaiting_second_check",
            VerifierState::SecondChecked(_) => "second_checked",
            VerifierState::Terminal(_) => "terminal",
        }
    }
}

/// Input fed back to the machine after an [`Action`] has been carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start,
    /// The reboot command was sent; accepted or not does not matter.
    RestartIssued,
    DelayElapsed,
    StatusObserved(OutcomeStatus),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Start => "start",
            Event::RestartIssued => "restart_issued",
            Event::DelayElapsed => "delay_elapsed",
            Event::StatusObserved(_) => "status_observed",
        }
    }
}

/// Work the caller must perform next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Restart(InstanceId),
    Sleep(Duration),
    QueryStatus(InstanceId),
    Finish(OutcomeStatus),
}

/// Restart-and-verify state machine for one server.
///
/// ```text
/// Idle ─▶ Restarting ─▶ AwaitingFirstCheck ─▶ FirstChecked ─┬─────────────────────────────────────▶ Terminal
///   │                                                      └▶ AwaitingSecondCheck ─▶ SecondChecked ─▶ Terminal
///   └─(unresolved)─────────────────────────────────────────────────────────────────────────────────▶ Terminal
/// ```
///
/// Never performs I/O itself; at most two status queries are ever requested.
#[derive(Debug)]
pub struct Verifier<'p> {
    policy: &'p RetryPolicy,
    state: VerifierState,
    checks: u8,
}

impl<'p> Verifier<'p> {
    pub fn new(policy: &'p RetryPolicy, id: Option<InstanceId>) -> Self {
        Self {
            policy,
            state: VerifierState::Idle(id),
            checks: 0,
        }
    }

    pub fn state(&self) -> &VerifierState {
        &self.state
    }

    /// Number of status queries requested so far.
    pub fn checks(&self) -> u8 {
        self.checks
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, VerifierState::Terminal(_))
    }

    pub fn handle(&mut self, event: Event) -> Result<Action, CoreError> {
        use VerifierState as S;

        let (next, action) = match (&self.state, event) {
            (S::Idle(None), Event::Start) => (
                S::Terminal(OutcomeStatus::NotFound),
                Action::Finish(OutcomeStatus::NotFound),
            ),
            (S::Idle(Some(id)), Event::Start) => (S::Restarting(id.clone()), Action::Restart(id.clone())),
            (S::Restarting(id), Event::RestartIssued) => (
                S::AwaitingFirstCheck(id.clone()),
                Action::Sleep(self.policy.first_check_delay),
            ),
            (S::AwaitingFirstCheck(id), Event::DelayElapsed) => {
                self.checks += 1;
                (S::FirstChecked(id.clone()), Action::QueryStatus(id.clone()))
            }
            (S::FirstChecked(id), Event::StatusObserved(status)) => {
                if self.policy.needs_recheck(&status) {
                    (
                        S::AwaitingSecondCheck(id.clone()),
                        Action::Sleep(self.policy.second_check_delay),
                    )
                } else {
                    (S::Terminal(status.clone()), Action::Finish(status))
                }
            }
            (S::AwaitingSecondCheck(id), Event::DelayElapsed) => {
                self.checks += 1;
                (S::SecondChecked(id.clone()), Action::QueryStatus(id.clone()))
            }
            (S::SecondChecked(_), Event::StatusObserved(status)) => {
                (S::Terminal(status.clone()), Action::Finish(status))
            }
            (state, event) => {
                return Err(CoreError::InvalidTransition {
                    state: state.name(),
                    event: event.name(),
                });
            }
        };

        self.state = next;
        Ok(action)
    }
}
