use std::fmt;

/// Final status recorded for one server.
///
/// Either the literal string reported by the control service, or one of two sentinels
/// produced locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutcomeStatus {
    /// Status string as reported by the control service (`active`, `pending`, ...).
    Reported(String),
    /// The status query itself failed (transport or decode error).
    Failed,
    /// The label did not resolve to any instance.
    NotFound,
}

impl OutcomeStatus {
    pub const FAILED: &'static str = "Failed";
    pub const NOT_FOUND: &'static str = "Instance ID not found";

    pub fn reported(status: impl Into<String>) -> Self {
        OutcomeStatus::Reported(status.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            OutcomeStatus::Reported(s) => s,
            OutcomeStatus::Failed => Self::FAILED,
            OutcomeStatus::NotFound => Self::NOT_FOUND,
        }
    }

    /// Returns `true` if the control service reported the instance as `active`.
    pub fn is_active(&self) -> bool {
        matches!(self, OutcomeStatus::Reported(s) if s == "active")
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
