use std::collections::BTreeSet;
use std::time::Duration;

use rbt_model::OutcomeStatus;

/// Grace period between the reboot command and the first status query.
pub const FIRST_CHECK_DELAY: Duration = Duration::from_secs(60);

/// Additional wait before the second, final status query.
pub const SECOND_CHECK_DELAY: Duration = Duration::from_secs(120);

/// Reported statuses that mean the instance is still transitioning or unhealthy.
pub const DEFAULT_RECHECK_STATUSES: [&str; 5] =
    ["suspended", "shutting_down", "pending", "stopped", "failed"];

/// Bounded verification policy: two fixed delays and at most one recheck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub first_check_delay: Duration,
    pub second_check_delay: Duration,
    recheck_statuses: BTreeSet<String>,
    /// Whether a failed first query (the `Failed` sentinel) earns the second check.
    pub recheck_on_query_failure: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            first_check_delay: FIRST_CHECK_DELAY,
            second_check_delay: SECOND_CHECK_DELAY,
            recheck_statuses: DEFAULT_RECHECK_STATUSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            recheck_on_query_failure: true,
        }
    }
}

impl RetryPolicy {
    pub fn new(first_check_delay: Duration, second_check_delay: Duration) -> Self {
        Self {
            first_check_delay,
            second_check_delay,
            ..Self::default()
        }
    }

    /// Replace the recheck set. Matching is exact and case-sensitive.
    pub fn with_recheck_statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recheck_statuses = statuses.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_recheck_on_query_failure(mut self, enabled: bool) -> Self {
        self.recheck_on_query_failure = enabled;
        self
    }

    pub fn recheck_statuses(&self) -> impl Iterator<Item = &str> {
        self.recheck_statuses.iter().map(String::as_str)
    }

    /// Returns `true` if a first-check result should be followed by the second check.
    pub fn needs_recheck(&self, status: &OutcomeStatus) -> bool {
        match status {
            OutcomeStatus::Reported(s) => self.recheck_statuses.contains(s),
            OutcomeStatus::Failed => self.recheck_on_query_failure,
            OutcomeStatus::NotFound => false,
        }
    }

    /// Upper bound on time spent waiting for one server.
    pub fn max_wait(&self) -> Duration {
        self.first_check_delay + self.second_check_delay
    }
}
